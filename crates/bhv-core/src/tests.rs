//! Unit tests for bhv-core primitives.

#[cfg(test)]
mod keys {
    use crate::{BehaviorId, NodeId, SequenceId, SuspendToken};

    #[test]
    fn construction_and_as_str() {
        let node = NodeId::new("n1");
        assert_eq!(node.as_str(), "n1");
        assert_eq!(NodeId::from("n1"), node);
    }

    #[test]
    fn blank_detection() {
        assert!(SequenceId::new("").is_blank());
        assert!(SequenceId::new("   ").is_blank());
        assert!(!SequenceId::new("seq-1").is_blank());
    }

    #[test]
    fn display_includes_type_name() {
        assert_eq!(NodeId::new("n1").to_string(), "NodeId(n1)");
        assert_eq!(BehaviorId::new("b").to_string(), "BehaviorId(b)");
    }

    #[test]
    fn tokens_are_ordinary_map_keys() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(SuspendToken::new("t1"), 1u32);
        assert_eq!(map.get(&SuspendToken::new("t1")), Some(&1));
        assert_eq!(map.get(&SuspendToken::new("t2")), None);
    }
}

#[cfg(test)]
mod action {
    use crate::TriggerAction;

    #[test]
    fn parse_roundtrip() {
        for action in TriggerAction::ALL {
            assert_eq!(TriggerAction::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(TriggerAction::parse(" Approach "), Some(TriggerAction::Approach));
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(TriggerAction::parse("hover"), None);
    }

    #[test]
    fn only_perform_allows_multiple_groups() {
        assert!(TriggerAction::Perform.allows_multiple_groups());
        assert!(!TriggerAction::Click.allows_multiple_groups());
        assert!(!TriggerAction::Approach.allows_multiple_groups());
        assert!(!TriggerAction::Depart.allows_multiple_groups());
    }
}

#[cfg(test)]
mod mint {
    use crate::IdMinter;

    #[test]
    fn seeded_minters_reproduce() {
        let mut a = IdMinter::with_seed(7);
        let mut b = IdMinter::with_seed(7);
        assert_eq!(a.mint_token(), b.mint_token());
        assert_eq!(a.mint_sequence_id(), b.mint_sequence_id());
        assert_eq!(a.mint_behavior_id(), b.mint_behavior_id());
    }

    #[test]
    fn tokens_are_unique_within_a_minter() {
        let mut minter = IdMinter::with_seed(7);
        let first = minter.mint_token();
        let second = minter.mint_token();
        assert_ne!(first, second);
    }

    #[test]
    fn minted_ids_carry_family_prefixes() {
        let mut minter = IdMinter::with_seed(0);
        assert!(minter.mint_sequence_id().as_str().starts_with("seq-"));
        assert!(minter.mint_behavior_id().as_str().starts_with("bhv-"));
        assert_eq!(minter.mint_token().as_str().len(), 32);
    }
}
