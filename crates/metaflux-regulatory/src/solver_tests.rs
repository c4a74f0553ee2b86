use metaflux_core::{
    Condition, EntityId, FluxConstraint, Interaction, InteractionNetwork, MetafluxError,
    RuleSet,
};

use crate::{RegulatorySolver, MAX_ITERATIONS};

/// Single self-inhibiting entity: A flips between 1 and 0 every step.
fn oscillator() -> InteractionNetwork {
    let mut net = InteractionNetwork::new();
    net.set_initial_level("A".into(), 1);
    net.add_rules(
        "A".into(),
        RuleSet::new(
            vec![Interaction::new(
                Condition::Is("A".into(), 1),
                vec![("A".into(), 0)],
            )],
            Interaction::fallback("A".into(), 1),
        ),
    );
    net
}

/// A holds its initial level forever.
fn fixed_point() -> InteractionNetwork {
    let mut net = InteractionNetwork::new();
    net.set_initial_level("A".into(), 1);
    net.add_rules(
        "A".into(),
        RuleSet::new(vec![], Interaction::fallback("A".into(), 1)),
    );
    net
}

#[test]
fn test_fixed_point_emits_fixed_constraint() {
    let net = fixed_point();
    let constraints = RegulatorySolver::new(&net).solve(&[]).unwrap();

    assert_eq!(constraints.len(), 1);
    let c = &constraints[0];
    assert_eq!(c.entity, EntityId::from("A"));
    // No translation declared: the raw level is both bounds.
    assert_eq!(c.lower, 1.0);
    assert_eq!(c.upper, 1.0);
    assert!(c.is_fixed());
}

#[test]
fn test_fixed_point_uses_translation() {
    let mut net = fixed_point();
    net.set_translation("A".into(), 1, (8.0, 8.0));

    let constraints = RegulatorySolver::new(&net).solve(&[]).unwrap();
    assert_eq!(constraints[0].lower, 8.0);
    assert_eq!(constraints[0].upper, 8.0);
}

#[test]
fn test_cycle_constraint_is_mean_of_translated_bounds() {
    let mut net = oscillator();
    net.set_translation("A".into(), 1, (0.0, 10.0));
    net.set_translation("A".into(), 0, (0.0, 0.0));

    let constraints = RegulatorySolver::new(&net).solve(&[]).unwrap();
    assert_eq!(constraints.len(), 1);
    assert_eq!(constraints[0].lower, 0.0);
    assert_eq!(constraints[0].upper, 5.0);
}

#[test]
fn test_untranslated_cycle_averages_raw_levels() {
    let net = oscillator();
    let constraints = RegulatorySolver::new(&net).solve(&[]).unwrap();
    assert_eq!(constraints[0].lower, 0.5);
    assert_eq!(constraints[0].upper, 0.5);
}

#[test]
fn test_external_fixed_constraint_overrides_and_pins() {
    let net = oscillator();
    // Pin A to 0 from outside: it is no longer simulated, so the
    // oscillation never starts and the attractor is the pinned state.
    let external = [FluxConstraint::fixed("A".into(), 0.0)];
    let constraints = RegulatorySolver::new(&net).solve(&external).unwrap();

    assert_eq!(constraints.len(), 1);
    assert_eq!(constraints[0].lower, 0.0);
    assert_eq!(constraints[0].upper, 0.0);
}

#[test]
fn test_pinned_entity_ignores_consequences_of_other_rules() {
    let mut net = InteractionNetwork::new();
    net.set_initial_level("A".into(), 0);
    net.set_initial_level("B".into(), 0);
    // B's default would push A to 9 every step.
    net.add_rules(
        "B".into(),
        RuleSet::new(
            vec![],
            Interaction::new(Condition::Always, vec![("B".into(), 0), ("A".into(), 9)]),
        ),
    );

    let external = [FluxConstraint::fixed("A".into(), 2.0)];
    let constraints = RegulatorySolver::new(&net).solve(&external).unwrap();

    let a = constraints
        .iter()
        .find(|c| c.entity == EntityId::from("A"))
        .unwrap();
    assert_eq!(a.lower, 2.0);
    assert_eq!(a.upper, 2.0);
}

#[test]
fn test_non_fixed_external_constraints_are_ignored() {
    let net = fixed_point();
    let external = [FluxConstraint::bounded("A".into(), 0.0, 5.0)];
    let constraints = RegulatorySolver::new(&net).solve(&external).unwrap();
    // The range constraint does not pin A, so the network's own level wins.
    assert_eq!(constraints[0].lower, 1.0);
}

#[test]
fn test_non_integer_external_value_without_translation_is_fatal() {
    let net = fixed_point();
    let external = [FluxConstraint::fixed("A".into(), 0.5)];
    let err = RegulatorySolver::new(&net).solve(&external).unwrap_err();
    assert!(matches!(err, MetafluxError::Translation { .. }));
}

#[test]
fn test_non_integer_external_value_with_translation_maps_back() {
    let mut net = fixed_point();
    net.set_translation("A".into(), 0, (0.5, 0.5));
    net.set_translation("A".into(), 1, (1.0, 1.0));

    let external = [FluxConstraint::fixed("A".into(), 0.5)];
    let constraints = RegulatorySolver::new(&net).solve(&external).unwrap();
    // 0.5 maps back to level 0, whose translation pins (0.5, 0.5).
    assert_eq!(constraints[0].lower, 0.5);
}

#[test]
fn test_out_of_domain_attractor_level_is_fatal() {
    let mut net = InteractionNetwork::new();
    net.set_initial_level("A".into(), 5);
    net.set_domain("A".into(), vec![0, 1]);
    net.add_rules(
        "A".into(),
        RuleSet::new(vec![], Interaction::fallback("A".into(), 5)),
    );

    let err = RegulatorySolver::new(&net).solve(&[]).unwrap_err();
    assert!(matches!(err, MetafluxError::Translation { .. }));
}

#[test]
fn test_out_of_domain_external_level_is_fatal() {
    let mut net = fixed_point();
    net.set_domain("A".into(), vec![0, 1]);
    let external = [FluxConstraint::fixed("A".into(), 7.0)];
    let err = RegulatorySolver::new(&net).solve(&external).unwrap_err();
    assert!(matches!(err, MetafluxError::Translation { .. }));
}

#[test]
fn test_iteration_cap_is_non_fatal_and_unconstrained() {
    // A climbs one level per step and never revisits a state, so the
    // simulation hits the cap instead of finding an attractor. The
    // degraded outcome is an empty constraint set, not an error.
    let mut net = InteractionNetwork::new();
    net.set_initial_level("A".into(), 0);
    let climb: Vec<Interaction> = (0..=MAX_ITERATIONS as i64)
        .map(|k| Interaction::new(Condition::Is("A".into(), k), vec![("A".into(), k + 1)]))
        .collect();
    net.add_rules(
        "A".into(),
        RuleSet::new(climb, Interaction::fallback("A".into(), 0)),
    );

    let constraints = RegulatorySolver::new(&net).solve(&[]).unwrap();
    assert!(constraints.is_empty());
}

#[test]
fn test_two_entity_cycle_and_determinism() {
    // A copies the negation of B; B copies A. Period-4 cycle from (1, 0).
    let mut net = InteractionNetwork::new();
    net.set_initial_level("A".into(), 1);
    net.set_initial_level("B".into(), 0);
    net.add_rules(
        "A".into(),
        RuleSet::new(
            vec![Interaction::new(
                Condition::Is("B".into(), 1),
                vec![("A".into(), 0)],
            )],
            Interaction::fallback("A".into(), 1),
        ),
    );
    net.add_rules(
        "B".into(),
        RuleSet::new(
            vec![Interaction::new(
                Condition::Is("A".into(), 1),
                vec![("B".into(), 1)],
            )],
            Interaction::fallback("B".into(), 0),
        ),
    );

    let first = RegulatorySolver::new(&net).solve(&[]).unwrap();
    let second = RegulatorySolver::new(&net).solve(&[]).unwrap();
    assert_eq!(first, second);

    // Over the 4-cycle each entity spends half its time at level 1.
    assert_eq!(first.len(), 2);
    for c in &first {
        assert_eq!(c.lower, 0.5);
        assert_eq!(c.upper, 0.5);
    }
}
