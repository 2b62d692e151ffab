use serde::Deserialize;

use crate::error::RetimeError;
use crate::types::Slot;

/// One externally supplied timing record, before validation.
///
/// Two key conventions are accepted for the time pair: `start_sec`/`end_sec`
/// (preferred) and `start`/`end`. Values may be JSON numbers or numeric
/// strings. `index` is optional; records without one take their 1-based
/// position in the input list.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotRecord {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    start_sec: Option<Seconds>,
    #[serde(default)]
    end_sec: Option<Seconds>,
    #[serde(default)]
    start: Option<Seconds>,
    #[serde(default)]
    end: Option<Seconds>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Seconds {
    Number(f64),
    Text(String),
}

impl Seconds {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl SlotRecord {
    pub fn new(index: Option<u32>, start_sec: f64, end_sec: f64) -> Self {
        Self {
            index,
            start_sec: Some(Seconds::Number(start_sec)),
            end_sec: Some(Seconds::Number(end_sec)),
            start: None,
            end: None,
        }
    }

    /// Resolves the time pair from whichever key convention the record uses.
    fn times(&self) -> Result<(f64, f64), String> {
        let pair = match (&self.start_sec, &self.end_sec) {
            (Some(s), Some(e)) => (s, e),
            _ => match (&self.start, &self.end) {
                (Some(s), Some(e)) => (s, e),
                _ => return Err("no recognizable start/end time keys".to_string()),
            },
        };
        let start = pair
            .0
            .as_f64()
            .ok_or_else(|| "start time is not numeric".to_string())?;
        let end = pair
            .1
            .as_f64()
            .ok_or_else(|| "end time is not numeric".to_string())?;
        if !start.is_finite() || !end.is_finite() {
            return Err("start/end times must be finite".to_string());
        }
        Ok((start, end))
    }
}

/// Resolves and orders the slot sequence an assembly run will walk.
pub struct SlotTimeline;

impl SlotTimeline {
    /// Parses newline-delimited JSON records. Blank lines are skipped; the
    /// error for an unparseable line carries its 1-based line number.
    pub fn parse_jsonl(text: &str) -> Result<Vec<SlotRecord>, RetimeError> {
        let mut records = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: SlotRecord = serde_json::from_str(line)
                .map_err(|e| RetimeError::malformed_record(line_no + 1, e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    /// Builds slots from records and stably sorts them by start time, so
    /// equal-start slots keep their input order. The input need not be sorted
    /// and indices need not be contiguous or unique.
    pub fn build(records: &[SlotRecord], sample_rate_hz: u32) -> Result<Vec<Slot>, RetimeError> {
        let mut slots = Vec::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            let (start_sec, end_sec) = record
                .times()
                .map_err(|message| RetimeError::malformed_record(pos + 1, message))?;
            let index = record.index.unwrap_or((pos + 1) as u32);
            slots.push(Slot::from_times(index, start_sec, end_sec, sample_rate_hz));
        }
        slots.sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));
        Ok(slots)
    }

    /// `build` plus an optional prefix truncation, applied after sorting.
    pub fn build_truncated(
        records: &[SlotRecord],
        sample_rate_hz: u32,
        max_slots: Option<usize>,
    ) -> Result<Vec<Slot>, RetimeError> {
        let mut slots = Self::build(records, sample_rate_hz)?;
        if let Some(max_slots) = max_slots {
            slots.truncate(max_slots);
        }
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RetimeError;

    #[test]
    fn parse_jsonl_accepts_both_key_conventions() {
        let text = r#"
            {"index": 3, "start_sec": 0.5, "end_sec": 1.5}

            {"start": "2.0", "end": "3.25"}
        "#;
        let records = SlotTimeline::parse_jsonl(text).unwrap();
        assert_eq!(records.len(), 2);

        let slots = SlotTimeline::build(&records, 16_000).unwrap();
        assert_eq!(slots[0].index, 3);
        assert_eq!(slots[0].start_sample, 8_000);
        // Second record has no index and falls back to its 1-based position.
        assert_eq!(slots[1].index, 2);
        assert_eq!(slots[1].start_sample, 32_000);
        assert_eq!(slots[1].end_sample, 52_000);
    }

    #[test]
    fn parse_jsonl_reports_line_number() {
        let text = "{\"start\": 0.0, \"end\": 1.0}\nnot json\n";
        let err = SlotTimeline::parse_jsonl(text).unwrap_err();
        match err {
            RetimeError::MalformedRecord { record, .. } => assert_eq!(record, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn build_rejects_records_without_time_keys() {
        let records = SlotTimeline::parse_jsonl(r#"{"index": 1, "text": "hello"}"#).unwrap();
        let err = SlotTimeline::build(&records, 16_000).unwrap_err();
        assert!(matches!(err, RetimeError::MalformedRecord { record: 1, .. }));
    }

    #[test]
    fn build_rejects_non_numeric_times() {
        let records =
            SlotTimeline::parse_jsonl(r#"{"start": "soon", "end": "later"}"#).unwrap();
        assert!(SlotTimeline::build(&records, 16_000).is_err());
    }

    #[test]
    fn build_sorts_by_start_keeping_input_order_on_ties() {
        let records = vec![
            SlotRecord::new(Some(10), 2.0, 3.0),
            SlotRecord::new(Some(11), 0.0, 1.0),
            SlotRecord::new(Some(12), 0.0, 0.5),
        ];
        let slots = SlotTimeline::build(&records, 8_000).unwrap();
        let indices: Vec<u32> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![11, 12, 10]);
    }

    #[test]
    fn build_keeps_degenerate_and_overlapping_slots() {
        let records = vec![
            SlotRecord::new(Some(1), 0.0, 1.0),
            SlotRecord::new(Some(2), 0.5, 1.5),
            SlotRecord::new(Some(3), 2.0, 2.0),
        ];
        let slots = SlotTimeline::build(&records, 8_000).unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[2].slot_len(), 0);
    }

    #[test]
    fn build_truncated_is_a_post_sort_prefix() {
        let records = vec![
            SlotRecord::new(Some(1), 5.0, 6.0),
            SlotRecord::new(Some(2), 0.0, 1.0),
        ];
        let slots = SlotTimeline::build_truncated(&records, 8_000, Some(1)).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].index, 2);
    }
}
