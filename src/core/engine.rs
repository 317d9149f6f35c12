use crate::core::{Pipeline, StackReport};
use crate::utils::error::Result;

pub struct StackEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> StackEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<StackReport> {
        println!("Starting stacking process...");

        // Scan
        println!("Scanning input images...");
        let entries = self.pipeline.scan()?;
        println!("Found {} images", entries.len());

        // Group
        println!("Grouping images...");
        let batches = self.pipeline.group(entries)?;
        println!("Formed {} batches", batches.len());

        // Compose
        println!("Composing combined images...");
        let report = self.pipeline.compose(batches)?;
        println!("Saved {} combined images", report.outputs.len());

        Ok(report)
    }
}
