mod node;
mod page;
mod patch;

pub use node::{Node, escape};
pub use page::{Download, HIDDEN, Indicator, IndicatorGuard, Page, PageError, SharedPage};
pub use patch::{ChartKind, ChartSpec, Dataset, Patch, Slot, percent};
