#![cfg(feature = "serde")]

use std::time::Duration;

use evolvex::{
    evolution::{EvolutionEvent, EvolutionOptions, EvolutionState, LogLevel},
    population::GenerationRetention,
    selection::TournamentSelection,
    termination::TimeEvolvingTermination,
};

#[test]
fn test_options_survive_json() {
    let options = EvolutionOptions::builder()
        .crossover_probability(0.6)
        .seed(99)
        .log_level(LogLevel::Minimal)
        .build()
        .unwrap();

    let json = serde_json::to_string(&options).unwrap();
    let restored: EvolutionOptions = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, options);
}

#[test]
fn test_options_reject_out_of_range_probabilities() {
    let json = r#"{"crossover_probability":3.0,"mutation_probability":0.2,"seed":null,"log_level":"None"}"#;
    let error = serde_json::from_str::<EvolutionOptions>(json).unwrap_err();
    assert!(error.to_string().contains("Crossover probability"));

    let json = r#"{"crossover_probability":0.5,"mutation_probability":-0.1,"seed":7,"log_level":"Verbose"}"#;
    assert!(serde_json::from_str::<EvolutionOptions>(json).is_err());

    let json = r#"{"crossover_probability":0.5,"mutation_probability":0.1,"seed":7,"log_level":"Verbose"}"#;
    let options: EvolutionOptions = serde_json::from_str(json).unwrap();
    assert_eq!(options.seed(), Some(7));
    assert_eq!(options.log_level(), LogLevel::Verbose);
}

#[test]
fn test_configuration_types_serialize() {
    let retention: GenerationRetention =
        serde_json::from_str(&serde_json::to_string(&GenerationRetention::KeepLast(3)).unwrap())
            .unwrap();
    assert_eq!(retention, GenerationRetention::KeepLast(3));

    let tournament = TournamentSelection::new(4, false).unwrap();
    let restored: TournamentSelection =
        serde_json::from_str(&serde_json::to_string(&tournament).unwrap()).unwrap();
    assert_eq!(restored.size(), 4);
    assert!(!restored.allow_winner_compete_next_tournament());

    let termination = TimeEvolvingTermination::new(Duration::from_secs(30));
    let restored: TimeEvolvingTermination =
        serde_json::from_str(&serde_json::to_string(&termination).unwrap()).unwrap();
    assert_eq!(restored, termination);
}

#[test]
fn test_events_serialize() {
    let event = EvolutionEvent::GenerationRan {
        generation: 7,
        best_fitness: Some(1.5),
    };
    let json = serde_json::to_value(event).unwrap();

    assert_eq!(json["GenerationRan"]["generation"], 7);
    assert_eq!(
        serde_json::to_string(&EvolutionState::TerminationReached).unwrap(),
        "\"TerminationReached\""
    );
}
