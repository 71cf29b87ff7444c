use notes_api::client::{ApiClient, NoteBoard};

use serde_json::to_string_pretty;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let addr =
        std::env::var("NOTES_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000/api".to_string());

    let client = ApiClient::new(addr);
    let health = client.health().await?;
    println!("Connected to {} ({})\n", client.base_url(), health.message);

    let mut board = NoteBoard::new(client);

    // Load notes
    println!("1. Loading notes...");
    board.load().await;
    println!("Loaded {} notes\n", board.notes().len());

    // Create note
    println!("2. Creating a note...");
    board.open_new();
    board.form_mut().title = "Shopping".to_string();
    board.form_mut().content = "Milk, eggs".to_string();
    if !board.submit().await {
        return Err("failed to create note".into());
    }
    let created = board
        .notes()
        .first()
        .cloned()
        .ok_or("created note missing from board")?;
    println!("Created note: {}\n", to_string_pretty(&created)?);

    // Update note
    println!("3. Updating the note...");
    board.open_edit(created.id);
    board.form_mut().content = "Milk, eggs, bread".to_string();
    if !board.submit().await {
        return Err("failed to update note".into());
    }
    let updated = board
        .notes()
        .iter()
        .find(|note| note.id == created.id)
        .ok_or("updated note missing from board")?;
    println!("Updated note: {}\n", to_string_pretty(updated)?);

    // List notes
    println!("4. Current notes...");
    println!("Notes: {}\n", to_string_pretty(board.notes())?);

    // Delete note
    println!("5. Deleting the note...");
    let deleted = board.delete(created.id, || true).await;
    println!("Delete result: {deleted}\n");

    Ok(())
}
