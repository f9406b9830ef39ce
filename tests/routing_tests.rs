// Host-side tests for the audio graph wiring.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod routing {
    include!("../src/core/routing.rs");
}

use routing::*;

#[test]
fn analyser_measures_the_unfiltered_source() {
    let inputs: Vec<_> = inputs_of(AudioNodeId::Analyser).collect();
    assert_eq!(inputs, vec![AudioNodeId::Source]);
    assert!(!feeds(AudioNodeId::Bandpass, AudioNodeId::Analyser));
    // the band-pass is only reached after the analyser
    let filter_inputs: Vec<_> = inputs_of(AudioNodeId::Bandpass).collect();
    assert_eq!(filter_inputs, vec![AudioNodeId::Analyser]);
}

#[test]
fn playback_reaches_the_speakers_through_the_analyser() {
    assert!(feeds(AudioNodeId::Source, AudioNodeId::Destination));
    let inputs: Vec<_> = inputs_of(AudioNodeId::Destination).collect();
    assert_eq!(inputs, vec![AudioNodeId::Analyser]);
}

#[test]
fn bandpass_is_a_dead_end_side_branch() {
    assert_eq!(outputs_of(AudioNodeId::Bandpass).count(), 0);
    assert!(!feeds(AudioNodeId::Bandpass, AudioNodeId::Destination));
    assert_eq!(inputs_of(AudioNodeId::Source).count(), 0);
}
