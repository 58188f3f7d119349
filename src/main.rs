use csv::{ReaderBuilder, Trim};
use tracing::{error, info};

use crate::bank::AccountStore;

mod bank;
mod logging;

/// The size of the channel for queued notifications.
const NOTIFICATION_CHANNEL_SIZE: usize = 1024;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() != 2 {
        eprintln!("Usage: {} <input_csv_file>", args[0]);
        std::process::exit(1);
    }
    let input_file = &args[1];

    let (notifier, mut worker) =
        bank::ChannelNotifier::channel(NOTIFICATION_CHANNEL_SIZE, bank::LoggingNotifier);
    let notifications = tokio::spawn(async move { worker.run().await });

    let service = bank::AccountsService::new(bank::InMemoryAccountStore::new(), notifier);

    let mut reader = match ReaderBuilder::new().trim(Trim::All).from_path(input_file) {
        Ok(reader) => reader,
        Err(err) => {
            error!(%err, file = %input_file, "failed to read CSV file");
            std::process::exit(1);
        }
    };

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            error!(%err, file = %input_file, "failed to read CSV header");
            std::process::exit(1);
        }
    };

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                error!(%err, "skipping unreadable row");
                continue;
            }
        };
        let line = record.position().map(|position| position.line());
        match record.deserialize::<bank::Operation>(Some(&headers)) {
            Ok(operation) => {
                let op_type = operation.get_type();
                let account = operation.get_account().to_owned();
                if let Err(err) = operation.apply(&service) {
                    let balance = service.get_account(&account).map(|a| a.balance()).ok();
                    error!(?line, ?op_type, %account, ?balance, %err, "operation rejected");
                }
            }
            Err(err) => error!(?line, %err, "skipping malformed row"),
        }
    }

    let accounts = service.store().accounts();
    drop(service); // Drops the notifier so the worker drains and stops
    match notifications.await {
        Ok(delivered) => info!(delivered, "notifications drained"),
        Err(err) => error!(%err, "notification worker failed"),
    }

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for account in &accounts {
        if let Err(err) = writer.serialize(account) {
            error!(%err, "error writing account");
        }
    }
    if let Err(err) = writer.flush() {
        error!(%err, "error flushing output");
    }
}
