use billed_api::{BilledApiError, Client, DEFAULT_BASE_URL, Request};

#[tokio::main]
pub async fn main() -> Result<(), BilledApiError> {
    let client = Client::new(DEFAULT_BASE_URL, None);

    let bills = client.send(Request::bills().list()).await?;
    for bill in bills {
        println!("{} {} {}", bill.id, bill.status, bill.name);
    }
    Ok(())
}
