use aws_config::Region;
use tracing::info;

use crate::config::Config;

/// Constructs the DynamoDB and Textract clients from the shared AWS config.
/// Credentials come from the default provider chain; a `DYNAMODB_ENDPOINT`
/// override points the store at a local stack.
pub async fn create_aws_clients(
    config: &Config,
) -> (aws_sdk_dynamodb::Client, aws_sdk_textract::Client) {
    let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()))
        .load()
        .await;

    let dynamodb = match &config.dynamodb_endpoint {
        Some(endpoint) => {
            info!("DynamoDB endpoint override: {endpoint}");
            let conf = aws_sdk_dynamodb::config::Builder::from(&shared)
                .endpoint_url(endpoint)
                .build();
            aws_sdk_dynamodb::Client::from_conf(conf)
        }
        None => aws_sdk_dynamodb::Client::new(&shared),
    };

    let textract = aws_sdk_textract::Client::new(&shared);

    info!("AWS clients initialized (region: {})", config.aws_region);
    (dynamodb, textract)
}
