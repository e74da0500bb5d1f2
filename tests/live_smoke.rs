use buda_api_client::BudaError;
use buda_api_client::auth::Credentials;
use buda_api_client::rest::RestClient;

fn live_tests_enabled() -> bool {
    std::env::var("BUDA_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let client = RestClient::new();
    let markets = client.get_markets().await?;
    assert!(!markets.is_empty());

    let book = client.get_order_book("btc-clp").await?;
    assert!(book.best_ask().is_some());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let credentials = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(BudaError::MissingCredentials) => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    let client = RestClient::builder().credentials(credentials).build();

    let _balances = client.get_balances().await?;
    let _orders = client.get_orders("btc-clp", Some("traded")).await?;

    Ok(())
}
