use futures::StreamExt;
use ollama_api::types::chat::ChatRequest;
use ollama_api::types::Message;
use ollama_api::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::builder().build()?;

    let request = ChatRequest::new("llama3.2", vec![Message::user("Hello! What can you do?")])
        .system("You are a concise assistant.");
    let mut stream = client.chat_stream(request).await?;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        print!("{}", chunk.message.content);
        if chunk.done {
            println!("\n[{} tokens]", chunk.eval_count);
        }
    }

    Ok(())
}
