use crate::report::GrowthReport;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Record")]
    record: &'static str,
    #[tabled(rename = "Counter")]
    counter: &'static str,
    #[tabled(rename = "Value")]
    value: u64,
}

/// Terminal table used by the CLI summary.
pub struct TableExporter;

impl TableExporter {
    pub fn format(report: &GrowthReport) -> String {
        let products = report
            .products
            .counters()
            .into_iter()
            .map(|(counter, value)| CounterRow { record: "products", counter, value });
        let streams = report
            .streams
            .counters()
            .into_iter()
            .map(|(counter, value)| CounterRow { record: "streams", counter, value });

        Table::new(products.chain(streams))
            .with(Style::rounded())
            .to_string()
    }
}
