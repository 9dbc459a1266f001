use csscompress_lib::{organize, organize_parts, RuleBlock, RuleBlocks};
use std::collections::BTreeMap;

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn sheet(rules: &[(&str, &str)]) -> RuleBlocks {
        rules
            .iter()
            .map(|&(selector, details)| RuleBlock::new(selector, details))
            .collect()
    }

    fn parts(entries: &[(usize, &str)]) -> BTreeMap<usize, String> {
        entries.iter().map(|&(i, s)| (i, s.to_string())).collect()
    }

    #[test]
    fn test_later_declarations_stay_last() {
        init_logging();
        let mut rules = sheet(&[("p", "color:red;"), ("p", "color:blue;")]);
        organize(&mut rules);
        assert_eq!(rules.to_string(), "p{color:red;color:blue;}");
    }

    #[test]
    fn test_shared_declarations_pool_selectors() {
        init_logging();
        let mut rules = sheet(&[("p", "color:blue;"), ("a", "color:blue;")]);
        organize(&mut rules);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get(0), Some(&RuleBlock::new("p,a", "color:blue;")));
    }

    #[test]
    fn test_both_passes_chain() {
        init_logging();
        // the two `div` blocks pool first, then match `span`
        let mut rules = sheet(&[
            ("div", "margin:0;"),
            ("span", "margin:0;padding:0;"),
            ("div", "padding:0;"),
            ("em", "font-style:normal;"),
        ]);
        organize(&mut rules);
        assert_eq!(
            rules.to_string(),
            "div,span{margin:0;padding:0;}em{font-style:normal;}"
        );
        assert_eq!(rules.slot_count(), 4);
    }

    #[test]
    fn test_organize_is_a_fixed_point() {
        init_logging();
        let mut rules = sheet(&[
            ("p", "a:1;"),
            ("h1", "b:2;"),
            ("p", "b:2;"),
            ("h2", "b:2;"),
            ("ul", "a:1;b:2;"),
            ("ol", "c:3;"),
        ]);
        organize(&mut rules);
        let once = rules.clone();
        organize(&mut rules);
        assert_eq!(rules, once);
        assert_eq!(
            once.to_string(),
            "p,ul{a:1;b:2;}h1,h2{b:2;}ol{c:3;}"
        );
    }

    #[test]
    fn test_joined_selectors_reach_a_fixed_point() {
        init_logging();
        // `a,b` only exists once the details pass has joined `a` and `b`
        let mut rules = sheet(&[("a", "x:1;"), ("b", "x:1;"), ("a,b", "y:2;")]);
        assert_eq!(organize(&mut rules), 2);
        assert_eq!(rules.to_string(), "a,b{x:1;y:2;}");

        let once = rules.clone();
        assert_eq!(organize(&mut rules), 0);
        assert_eq!(rules, once);
    }

    #[test]
    fn test_parts_keep_index_discipline() {
        init_logging();
        let (selectors, details) = organize_parts(
            parts(&[(0, "p"), (1, "a"), (2, "p"), (3, "b")]),
            parts(&[(0, "x:1;"), (1, "y:2;"), (2, "z:3;"), (3, "y:2;")]),
        );

        assert_eq!(selectors, parts(&[(0, "p"), (1, "a,b")]));
        assert_eq!(details, parts(&[(0, "x:1;z:3;"), (1, "y:2;")]));
    }

    #[test]
    fn test_malformed_input_is_tolerated() {
        init_logging();
        let (selectors, details) = organize_parts(parts(&[(4, "p")]), parts(&[(1, ";;;\\")]));
        assert_eq!(selectors, parts(&[(1, ""), (4, "p")]));
        assert_eq!(details, parts(&[(1, ";;;\\"), (4, "")]));
    }
}
