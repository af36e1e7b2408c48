//! Sample catalogs and template stores shared by the tests.

use crate::models::MetricCatalogItem;
use crate::templating::StaticTemplateStore;

use super::MockCatalog;

/// A small two-group catalog.
///
/// - `Linux servers`: `web01`, `web02`
/// - `Zabbix servers`: `Zabbix server`
///
/// `web01` and `web02` both report `CPU system time (avg1)`, so the item list
/// for the whole Linux group holds it once.
pub fn sample_catalog() -> MockCatalog {
    MockCatalog::new()
        .with_group("Linux servers", &["web01", "web02"])
        .with_group("Zabbix servers", &["Zabbix server"])
        .with_item("web01", "CPU", cpu_item("system"))
        .with_item("web01", "CPU", cpu_item("user"))
        .with_item("web01", "Memory", MetricCatalogItem::new("Available memory", "vm.memory.size[available]"))
        .with_item("web02", "CPU", cpu_item("system"))
        .with_item(
            "Zabbix server",
            "Zabbix server",
            MetricCatalogItem::new("Zabbix $4 $2 processes, in %", "zabbix[process,poller,avg,busy]"),
        )
}

/// `CPU $2 time ($3)` for the given CPU mode.
pub fn cpu_item(mode: &str) -> MetricCatalogItem {
    MetricCatalogItem::new("CPU $2 time ($3)", format!("system.cpu.util[,{mode},avg1]"))
}

/// Template store with `$env` (single value) and `$region` (two values).
pub fn sample_store() -> StaticTemplateStore {
    StaticTemplateStore::new()
        .with_variable("env", ["Linux servers"])
        .with_variable("region", ["web01", "web02"])
}
