use crate::schedule::rules::IqamahRule;

/// A rule matched for a particular day, along with its position in the
/// configured list. The position doubles as the display range index so the
/// renderer can group or alternate styling per range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    pub index: usize,
    pub rule: &'a IqamahRule,
}

/// Finds the rule governing `day`, scanning in insertion order.
///
/// First match wins: overlapping spans defer to whichever rule the user
/// placed earlier in the list. No match is an ordinary `None`; rules whose
/// span runs past the actual month length simply never see those days.
pub fn resolve_rule(day: u8, rules: &[IqamahRule]) -> Option<RuleMatch<'_>> {
    rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.covers(day))
        .map(|(index, rule)| RuleMatch { index, rule })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(start: u8, end: u8, time: &str) -> IqamahRule {
        IqamahRule::Fixed {
            start_day: start,
            end_day: end,
            time: time.parse().unwrap(),
        }
    }

    #[test]
    fn earliest_overlapping_rule_wins() {
        let rules = [fixed(1, 31, "6:00 am"), fixed(10, 20, "6:30 am")];
        let matched = resolve_rule(15, &rules).unwrap();
        assert_eq!(matched.index, 0);
        assert_eq!(matched.rule, &rules[0]);
    }

    #[test]
    fn later_rule_applies_outside_the_earlier_span() {
        let rules = [fixed(10, 20, "6:30 am"), fixed(1, 31, "6:00 am")];
        assert_eq!(resolve_rule(15, &rules).unwrap().index, 0);
        assert_eq!(resolve_rule(5, &rules).unwrap().index, 1);
        assert_eq!(resolve_rule(25, &rules).unwrap().index, 1);
    }

    #[test]
    fn no_rules_or_no_cover_is_none() {
        assert!(resolve_rule(1, &[]).is_none());
        let rules = [fixed(5, 10, "6:00 am")];
        assert!(resolve_rule(4, &rules).is_none());
        assert!(resolve_rule(11, &rules).is_none());
    }

    #[test]
    fn spans_past_month_end_are_harmless() {
        // A 31-day span over a 30-day month: days 1-30 still resolve.
        let rules = [fixed(29, 31, "6:00 am")];
        assert!(resolve_rule(30, &rules).is_some());
        assert!(resolve_rule(28, &rules).is_none());
    }
}
