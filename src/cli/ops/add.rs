use std::path::PathBuf;

use clap::Args;
use pinlog::ledger::{Ledger, DEFAULT_LEDGER_FILE};
use pinlog::store::AddError;

#[derive(Args, Debug, Clone)]
pub struct Add {
    /// Files to add; at least one, uploaded in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Audit ledger to append one row per added file
    #[arg(long, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Add {
    type Error = AddError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let ledger = Ledger::new(&self.ledger);
        let records = match ctx.store().add_files(&self.files, &ledger).await {
            Ok(records) => records,
            Err(AddError::LedgerWrite {
                path,
                records,
                source,
            }) => {
                // The uploads already happened; name them so the operator
                // can re-log by hand.
                for record in &records {
                    tracing::warn!(
                        "unlogged upload: {} {} {}",
                        record.name,
                        record.hash,
                        record.size
                    );
                }
                return Err(AddError::LedgerWrite {
                    path,
                    records,
                    source,
                });
            }
            Err(e) => return Err(e),
        };

        let mut lines: Vec<String> = records
            .iter()
            .map(|r| format!("added {} {} ({} bytes)", r.hash, r.name, r.size))
            .collect();
        lines.push(format!(
            "recorded {} entr{} in {}",
            records.len(),
            if records.len() == 1 { "y" } else { "ies" },
            self.ledger.display()
        ));
        Ok(lines.join("\n"))
    }
}
