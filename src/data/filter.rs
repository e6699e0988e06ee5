use super::record::FeeRecord;
use super::schema::PLACEHOLDER;

/// Drop records that are not ready for display. Order is preserved.
pub fn filter(records: Vec<FeeRecord>) -> Vec<FeeRecord> {
    records.into_iter().filter(is_displayable).collect()
}

/// A record is displayable when none of its identity fields carry the
/// placeholder and both fees are non-zero.
pub fn is_displayable(record: &FeeRecord) -> bool {
    let identity = [&record.code, &record.points, &record.title];
    if identity.iter().any(|value| value.as_str() == PLACEHOLDER) {
        return false;
    }
    record.international_fee != 0 && record.domestic_fee != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, title: &str, points: &str, int_fee: u64, dom_fee: u64) -> FeeRecord {
        FeeRecord {
            code: code.to_string(),
            title: title.to_string(),
            faculty: "Arts".to_string(),
            points: points.to_string(),
            international_fee: int_fee,
            domestic_fee: dom_fee,
        }
    }

    #[test]
    fn drops_placeholder_identity_fields() {
        let kept = filter(vec![
            record("TBC", "Intro", "15", 10, 10),
            record("ARTS101", "TBC", "15", 10, 10),
            record("ARTS102", "Intro", "TBC", 10, 10),
            record("ARTS103", "Intro", "15", 10, 10),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].code, "ARTS103");
    }

    #[test]
    fn drops_zero_fees() {
        let kept = filter(vec![
            record("A", "Intro", "15", 0, 10),
            record("B", "Intro", "15", 10, 0),
            record("C", "Intro", "15", 1, 1),
        ]);
        let codes: Vec<_> = kept.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["C"]);
    }

    #[test]
    fn keeps_order_and_ignores_other_fields() {
        let mut odd = record("Z9", "", "weird points", 3, 4);
        odd.faculty = "Other".to_string();
        let kept = filter(vec![record("B", "b", "15", 2, 2), odd.clone(), record("A", "a", "15", 1, 1)]);
        assert_eq!(kept[1], odd);
        assert_eq!(kept[0].code, "B");
        assert_eq!(kept[2].code, "A");
    }
}
