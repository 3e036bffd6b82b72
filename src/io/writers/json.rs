use crate::core::CommitAttribution;
use crate::io::output::OutputWriter;
use crate::metrics::SummaryReport;
use std::io::Write;

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_attributions(&mut self, attributions: &[CommitAttribution]) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, attributions)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_summary(&mut self, report: &SummaryReport) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OwnerFractions;
    use crate::metrics::ChangeMetric;

    #[test]
    fn test_attributions_serialize_as_array() {
        let mut owners = OwnerFractions::new();
        owners.insert("owner1".into(), 0.125);
        owners.insert("owner2".into(), 0.875);
        let records = vec![CommitAttribution {
            commit_id: "c2".into(),
            metric: ChangeMetric::InsertionsOnly,
            total_changes: 40,
            owners,
        }];

        let mut writer = JsonWriter::new(Vec::new());
        writer.write_attributions(&records).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();

        assert_eq!(value[0]["commit_id"], "c2");
        assert_eq!(value[0]["metric"], "insertions-only");
        assert_eq!(value[0]["total_changes"], 40);
        assert_eq!(value[0]["owners"]["owner2"], 0.875);
    }
}
