use futures::StreamExt;
use ollama_api::types::PullRequest;
use ollama_api::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::builder().build()?;

    let mut stream = client.pull_stream(PullRequest::new("llama3.2")).await?;

    while let Some(progress) = stream.next().await {
        let progress = progress?;
        if progress.total > 0 {
            println!(
                "{}: {}/{} bytes",
                progress.status, progress.completed, progress.total
            );
        } else {
            println!("{}", progress.status);
        }
    }

    Ok(())
}
