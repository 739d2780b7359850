// src/readings/group.rs

use std::collections::BTreeMap;

use super::GlucoseReading;

/// Glucose rows sharing one event label, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct EventGroup<'a> {
    pub event: &'a str,
    pub readings: Vec<&'a GlucoseReading>,
}

/// Partition by event label. Groups come out sorted by label; the index of a
/// group is its palette slot.
pub fn group_by_event(glucose: &[GlucoseReading]) -> Vec<EventGroup<'_>> {
    let mut by_event: BTreeMap<&str, Vec<&GlucoseReading>> = BTreeMap::new();
    for g in glucose {
        by_event.entry(g.event.as_str()).or_default().push(g);
    }
    by_event
        .into_iter()
        .map(|(event, readings)| EventGroup { event, readings })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(hour: u32, value: f64, event: &str) -> GlucoseReading {
        GlucoseReading {
            at: NaiveDate::from_ymd_opt(2017, 1, 2).unwrap().and_hms_opt(hour, 0, 0).unwrap(),
            concentration: value,
            event: s!(event),
        }
    }

    #[test]
    fn groups_sorted_rows_kept_in_order() {
        let rows = vec![
            reading(7, 100.0, "Before Meal"),
            reading(9, 140.0, "After Meal"),
            reading(12, 95.0, "Before Meal"),
        ];
        let groups = group_by_event(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].event, "After Meal");
        assert_eq!(groups[1].event, "Before Meal");
        let values: Vec<f64> = groups[1].readings.iter().map(|r| r.concentration).collect();
        assert_eq!(values, vec![100.0, 95.0]);
    }

    #[test]
    fn empty_input_no_groups() {
        assert!(group_by_event(&[]).is_empty());
    }
}
