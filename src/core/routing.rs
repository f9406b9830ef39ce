// Audio node wiring.
//
// The analyser taps the dry signal and passes it on to the speakers. The
// band-pass hangs off the analyser as a side branch with nothing downstream,
// so it never shapes what the sampler measures.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioNodeId {
    Source,
    Analyser,
    Bandpass,
    Destination,
}

/// Directed `(from, to)` connections of the audio graph.
pub static AUDIO_ROUTES: [(AudioNodeId, AudioNodeId); 3] = [
    (AudioNodeId::Source, AudioNodeId::Analyser),
    (AudioNodeId::Analyser, AudioNodeId::Destination),
    (AudioNodeId::Analyser, AudioNodeId::Bandpass),
];

pub fn inputs_of(node: AudioNodeId) -> impl Iterator<Item = AudioNodeId> {
    AUDIO_ROUTES
        .iter()
        .filter(move |(_, to)| *to == node)
        .map(|(from, _)| *from)
}

pub fn outputs_of(node: AudioNodeId) -> impl Iterator<Item = AudioNodeId> {
    AUDIO_ROUTES
        .iter()
        .filter(move |(from, _)| *from == node)
        .map(|(_, to)| *to)
}

/// True if signal leaving `from` reaches `to`. The graph is acyclic.
pub fn feeds(from: AudioNodeId, to: AudioNodeId) -> bool {
    outputs_of(from).any(|next| next == to || feeds(next, to))
}
