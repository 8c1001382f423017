use finboard_api::{ApiError, Client, DEFAULT_BASE_URL, Request};

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new(DEFAULT_BASE_URL);

    let accounts = client.send(Request::accounts().list()).await?;
    for account in accounts {
        println!("{} ({}): {:.2}", account.bank_name, account.account_type, account.balance);
    }
    Ok(())
}
