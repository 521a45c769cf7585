use ollama_api::{api, Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::builder().build()?;

    let response = api::generate(&client, "llama3.2", "Why is the sky blue?").await?;

    if !response.thinking.is_empty() {
        println!("Thinking: {}", response.thinking);
    }
    println!("{}", response.response);

    Ok(())
}
