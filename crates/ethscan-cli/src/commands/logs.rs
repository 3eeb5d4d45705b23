//! Event log command

use clap::Args;
use ethscan_sdk::{EventLogFilter, TopicOperator};

use super::client;
use crate::{config::Config, output::Output, CliError};

/// Query event logs
#[derive(Debug, Args)]
pub struct LogsCommand {
    /// First block of the range
    #[arg(long)]
    from_block: u64,
    /// Last block of the range (defaults to latest)
    #[arg(long)]
    to_block: Option<u64>,
    /// Contract that emitted the logs
    #[arg(long)]
    address: Option<String>,
    /// Topic constraint, repeat for topic0..topic3
    #[arg(long = "topic")]
    topics: Vec<String>,
    /// Join topics with OR instead of AND
    #[arg(long)]
    or: bool,
}

impl LogsCommand {
    /// Filter described by the arguments
    pub fn filter(&self) -> EventLogFilter {
        let op = if self.or {
            TopicOperator::Or
        } else {
            TopicOperator::And
        };

        let mut filter = EventLogFilter::new(self.from_block);
        if let Some(to) = self.to_block {
            filter = filter.to_block(to);
        }
        if let Some(address) = &self.address {
            filter = filter.address(address.clone());
        }
        for topic in &self.topics {
            filter = filter.add_topic_with_operator(topic.clone(), op);
        }
        filter
    }

    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let logs = client(config)?.event_logs(&self.filter()).await?;

        let mut out = Output::new(json)
            .field_u64("count", logs.len() as u64)
            .field_json("logs", &logs)?
            .message(&format!("Found {} logs", logs.len()));
        for log in &logs {
            out = out.line(format!(
                "  block {} tx {} log #{} ({} topics)",
                log.block_number,
                log.transaction_hash,
                log.log_index,
                log.topics.len()
            ));
        }
        out.print();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        logs: LogsCommand,
    }

    #[test]
    fn test_filter_from_args() {
        let harness = Harness::parse_from([
            "logs",
            "--from-block",
            "379224",
            "--to-block",
            "400000",
            "--topic",
            "0xaa",
            "--topic",
            "0xbb",
            "--or",
        ]);
        let filter = harness.logs.filter();
        assert_eq!(filter.from_block_number(), 379224);
        assert_eq!(filter.topic_count(), 2);
        assert_eq!(filter.topic_params()[1].1, "or");
    }
}
