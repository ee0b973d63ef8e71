use chrono::{DateTime, Local};
use std::collections::HashMap;

/// One press of the call button
#[derive(Clone, Debug)]
pub struct CallRecord {
    pub index: usize,
    pub name: String,
    pub font_size: u32,
    pub called_at: DateTime<Local>,
}

/// Calls made during this run. Kept in memory only.
#[derive(Clone, Debug, Default)]
pub struct CallHistory {
    pub calls: Vec<CallRecord>,
}

#[derive(Clone, Debug, Default)]
pub struct HistorySummary {
    pub total_calls: usize,
    pub distinct_names: usize,
    /// Names that have not come up yet out of the loaded list
    pub never_called: usize,
    /// (name, times called), most called first, ties in first-called order
    pub counts: Vec<(String, usize)>,
}

impl CallHistory {
    pub fn new() -> Self {
        Self { calls: Vec::new() }
    }

    pub fn record(&mut self, index: usize, name: &str, font_size: u32) {
        self.calls.push(CallRecord {
            index,
            name: name.to_string(),
            font_size,
            called_at: Local::now(),
        });
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Counts are keyed by list index so duplicate names stay separate entries
    pub fn summarize(&self, list_len: usize) -> HistorySummary {
        let mut order: Vec<usize> = Vec::new();
        let mut counts: HashMap<usize, (String, usize)> = HashMap::new();

        for call in &self.calls {
            let entry = counts.entry(call.index).or_insert_with(|| {
                order.push(call.index);
                (call.name.clone(), 0)
            });
            entry.1 += 1;
        }

        let mut counts: Vec<(String, usize)> = order
            .into_iter()
            .filter_map(|index| counts.remove(&index))
            .collect();
        // Stable sort keeps first-called order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        HistorySummary {
            total_calls: self.calls.len(),
            distinct_names: counts.len(),
            never_called: list_len.saturating_sub(counts.len()),
            counts,
        }
    }
}
