use futures::StreamExt;
use ollama_api::types::generate::GenerateRequest;
use ollama_api::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::builder().build()?;

    let request = GenerateRequest::new("llama3.2", "Tell me a story about a Rust programmer.");
    let mut stream = client.generate_stream(request).await?;

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => print!("{}", chunk.response),
            Err(e) => {
                eprintln!("\nstream error: {e}");
                break;
            }
        }
    }
    println!();

    Ok(())
}
