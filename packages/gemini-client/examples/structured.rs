//! Structured output example with a derived response schema

use gemini_client::GeminiClient;
use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct Apartment {
    /// Number of rooms, as written in the text
    rooms: Option<String>,
    /// Floor number
    floor: Option<String>,
    /// Street address
    address: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_env()?;

    let prompt = "Extract the apartment details: \
                  Bright 4-room apartment on the 3rd floor at 12 Herzl St, Haifa.";

    let apartment: Apartment = client.extract("gemini-2.0-flash", prompt).await?;

    println!("Address: {}", apartment.address);
    println!("Rooms:   {}", apartment.rooms.as_deref().unwrap_or("-"));
    println!("Floor:   {}", apartment.floor.as_deref().unwrap_or("-"));

    Ok(())
}
