use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        parallelism = 8
        verbose = true
        rounding_tolerance = 1e-8

        [dead_reactions]
        epsilon = 1e-5
    "#;

    let config = AnalysisConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.parallelism, 8);
    assert!(config.verbose);
    assert_eq!(config.rounding_tolerance, 1e-8);
    assert_eq!(config.dead_reactions.epsilon, 1e-5);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        parallelism: 2
        verbose: false
        dead_reactions:
          epsilon: 0.001
    "#;

    let config = AnalysisConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.parallelism, 2);
    assert!(!config.verbose);
    assert_eq!(config.dead_reactions.epsilon, 0.001);
}

#[test]
fn test_defaults() {
    let config = AnalysisConfig::from_toml_str("").unwrap();
    assert!(config.parallelism >= 1);
    assert!(!config.verbose);
    assert_eq!(config.dead_reactions.epsilon, 1e-6);
    assert_eq!(config.rounding_tolerance, 1e-9);
}

#[test]
fn test_builder() {
    let config = AnalysisConfig::new()
        .with_parallelism(4)
        .with_verbose(true)
        .with_dead_reaction_epsilon(1e-4);

    assert_eq!(config.parallelism, 4);
    assert!(config.verbose);
    assert_eq!(config.dead_reactions.epsilon, 1e-4);
}

#[test]
fn test_zero_parallelism_rejected() {
    let err = AnalysisConfig::from_toml_str("parallelism = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_non_positive_epsilon_rejected() {
    let toml = r#"
        [dead_reactions]
        epsilon = 0.0
    "#;
    let err = AnalysisConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
