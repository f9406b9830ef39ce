use crate::constants::*;
use crate::core::{AssetId, AssetLoadFailure, AudioNodeId, AUDIO_ROUTES};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Nodes that outlive any one playback. Cloning shares the same JS objects.
#[derive(Clone)]
pub struct AudioNodes {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    filter: web::BiquadFilterNode,
    destination: web::AudioDestinationNode,
}

impl AudioNodes {
    fn resolve<'a>(
        &'a self,
        id: AudioNodeId,
        source: Option<&'a web::AudioNode>,
    ) -> Option<&'a web::AudioNode> {
        match id {
            AudioNodeId::Source => source,
            AudioNodeId::Analyser => Some(&self.analyser),
            AudioNodeId::Bandpass => Some(&self.filter),
            AudioNodeId::Destination => Some(&self.destination),
        }
    }

    /// Connect the routes leaving `source` when one is given, otherwise the
    /// routes between the fixed nodes.
    fn connect_routes(&self, source: Option<&web::AudioNode>) -> Result<(), JsValue> {
        for &(from, to) in AUDIO_ROUTES.iter() {
            if (from == AudioNodeId::Source) != source.is_some() {
                continue;
            }
            if let (Some(a), Some(b)) = (self.resolve(from, source), self.resolve(to, source)) {
                a.connect_with_audio_node(b)?;
            }
        }
        Ok(())
    }
}

/// Playback and analysis graph, wired from `core::routing`.
///
/// `source -> analyser -> destination` is both what the sampler measures and
/// what the listener hears. The band-pass is configured on a branch off the
/// analyser. The source only exists once [`load_and_play`] has decoded the
/// track.
pub struct AudioGraph {
    nodes: AudioNodes,
    spectrum: Vec<u8>,
}

impl AudioGraph {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let analyser = web::AnalyserNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);

        let filter = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("BiquadFilterNode error: {:?}", e))?;
        filter.set_type(web::BiquadFilterType::Bandpass);
        filter.frequency().set_value(BANDPASS_FREQUENCY_HZ);
        filter.q().set_value(BANDPASS_Q);
        filter.gain().set_value(BANDPASS_GAIN_DB);

        let destination = ctx.destination();
        let nodes = AudioNodes {
            ctx,
            analyser,
            filter,
            destination,
        };
        nodes
            .connect_routes(None)
            .map_err(|e| anyhow::anyhow!("audio routing: {:?}", e))?;

        let bins = nodes.analyser.frequency_bin_count() as usize;
        log::info!("[audio] analyser ready, {} bins", bins);
        Ok(Self {
            nodes,
            spectrum: vec![0; bins],
        })
    }

    /// Current byte magnitude spectrum. All zeros until audio flows.
    pub fn read_spectrum(&mut self) -> &[u8] {
        let bins = self.nodes.analyser.frequency_bin_count() as usize;
        if self.spectrum.len() != bins {
            self.spectrum.resize(bins, 0);
        }
        self.nodes.analyser.get_byte_frequency_data(&mut self.spectrum);
        &self.spectrum
    }

    /// Handles needed to start playback from an async task.
    pub fn playback_handles(&self) -> AudioNodes {
        self.nodes.clone()
    }
}

fn failure(asset: AssetId) -> impl Fn(JsValue) -> AssetLoadFailure {
    move |e| AssetLoadFailure::new(asset, format!("{:?}", e))
}

/// Resume the context (needs a user gesture), fetch and decode `url`, and
/// start it once into the analyser.
pub async fn load_and_play(nodes: AudioNodes, url: &str) -> Result<(), AssetLoadFailure> {
    let ctx = &nodes.ctx;
    let resume = ctx.resume().map_err(failure(AssetId::AudioContext))?;
    JsFuture::from(resume)
        .await
        .map_err(failure(AssetId::AudioContext))?;

    let window =
        web::window().ok_or_else(|| AssetLoadFailure::new(AssetId::Audio, "no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(failure(AssetId::Audio))?
        .dyn_into()
        .map_err(failure(AssetId::Audio))?;
    if !resp.ok() {
        return Err(AssetLoadFailure::new(
            AssetId::Audio,
            format!("{} returned HTTP {}", url, resp.status()),
        ));
    }
    let bytes: js_sys::ArrayBuffer =
        JsFuture::from(resp.array_buffer().map_err(failure(AssetId::Audio))?)
            .await
            .map_err(failure(AssetId::Audio))?
            .dyn_into()
            .map_err(failure(AssetId::Audio))?;
    let decoded: web::AudioBuffer =
        JsFuture::from(ctx.decode_audio_data(&bytes).map_err(failure(AssetId::Audio))?)
            .await
            .map_err(failure(AssetId::Audio))?
            .dyn_into()
            .map_err(failure(AssetId::Audio))?;

    let source = web::AudioBufferSourceNode::new(ctx).map_err(failure(AssetId::Audio))?;
    source.set_buffer(Some(&decoded));
    let source_node: &web::AudioNode = &source;
    nodes
        .connect_routes(Some(source_node))
        .map_err(failure(AssetId::Audio))?;
    source.start().map_err(failure(AssetId::Audio))?;
    log::info!(
        "[audio] playing {} ({:.1}s)",
        url,
        decoded.duration()
    );
    Ok(())
}
