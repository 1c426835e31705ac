use std::cell::RefCell;
use std::io::Write;

use crate::metrics::snapshot::CapQueueMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for queue metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// by Prometheus or forwarded to an OpenTelemetry collector. Write errors are
/// ignored; metrics are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write> {
    prefix: String,
    writer: RefCell<W>,
}

impl<W: Write> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: RefCell::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self.writer.borrow_mut();
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self.writer.borrow_mut();
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write> MetricsExporter<CapQueueMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CapQueueMetricsSnapshot) {
        self.write_counter(
            &self.metric_name("insert_calls_total"),
            snapshot.insert_calls,
        );
        self.write_counter(&self.metric_name("insert_new_total"), snapshot.insert_new);
        self.write_counter(
            &self.metric_name("insert_updates_total"),
            snapshot.insert_updates,
        );
        self.write_counter(
            &self.metric_name("insert_rejected_total"),
            snapshot.insert_rejected,
        );
        self.write_counter(
            &self.metric_name("evicted_entries_total"),
            snapshot.evicted_entries,
        );
        self.write_counter(
            &self.metric_name("delete_calls_total"),
            snapshot.delete_calls,
        );
        self.write_counter(
            &self.metric_name("delete_found_total"),
            snapshot.delete_found,
        );
        self.write_counter(&self.metric_name("value_calls_total"), snapshot.value_calls);
        self.write_counter(&self.metric_name("value_hits_total"), snapshot.value_hits);
        self.write_counter(&self.metric_name("max_calls_total"), snapshot.max_calls);
        self.write_counter(&self.metric_name("max_empty_total"), snapshot.max_empty);
        self.write_counter(
            &self.metric_name("oldest_calls_total"),
            snapshot.oldest_calls,
        );
        self.write_counter(
            &self.metric_name("oldest_empty_total"),
            snapshot.oldest_empty,
        );
        self.write_counter(&self.metric_name("clears_total"), snapshot.clears);
        self.write_gauge(&self.metric_name("len"), snapshot.len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}
