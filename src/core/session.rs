// Scene context: the single owner of all mutable scene state.
//
// The browser layer feeds it three kinds of events (clicks, sampler ticks and
// animation frames) and reads back a [`FrameSnapshot`] to render plus a list
// of [`Effect`]s to carry out against the page.

use super::camera::CameraPose;
use super::constants::SCALE_TWEEN_MS;
use super::error::{AssetId, AssetLoadFailure};
use super::orbit::{OrbitController, OrbitEffect, OrbitParams};
use super::sampler::VolumeSampler;
use super::tween::{Easing, Tweener};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    LoadAndPlayAudio,
    HidePrompt,
    PlayVideo,
}

pub type Effects = SmallVec<[Effect; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BoxScale;

/// Read-only view of the scene handed to the renderer once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub camera: CameraPose,
    pub box_position: Vec3,
    pub box_scale: Vec3,
    pub video_ready: bool,
}

pub struct SceneContext {
    orbit: OrbitController,
    sampler: VolumeSampler,
    box_scale: Vec3,
    scale_tween: Tweener<BoxScale, Vec3>,
    interacted: bool,
    video_ready: bool,
    degraded: SmallVec<[AssetId; 3]>,
    last_frame_ms: Option<f64>,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self::new(OrbitParams::default(), VolumeSampler::default())
    }
}

impl SceneContext {
    pub fn new(params: OrbitParams, sampler: VolumeSampler) -> Self {
        Self {
            orbit: OrbitController::new(params),
            sampler,
            box_scale: Vec3::ONE,
            scale_tween: Tweener::new(),
            interacted: false,
            video_ready: false,
            degraded: SmallVec::new(),
            last_frame_ms: None,
        }
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn box_scale(&self) -> Vec3 {
        self.box_scale
    }

    /// Target of the in-flight scale transition, if any.
    pub fn scale_target(&self) -> Option<Vec3> {
        self.scale_tween.get(BoxScale).map(|t| t.target())
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    /// Page-wide click. Only the first one does anything.
    pub fn on_click(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.interacted {
            return effects;
        }
        self.interacted = true;
        log::info!("[session] first click: starting audio and opening sequence");
        effects.push(Effect::LoadAndPlayAudio);
        effects.push(Effect::HidePrompt);
        self.orbit.start_animation();
        effects
    }

    /// Sampler tick. Re-targets the box scale, superseding any in-flight
    /// transition, and returns the new uniform target.
    pub fn on_sample(&mut self, spectrum: &[u8]) -> f32 {
        let target = self.sampler.target_scale(spectrum);
        self.scale_tween.start(
            BoxScale,
            self.box_scale,
            Vec3::splat(target),
            SCALE_TWEEN_MS,
            Easing::QuadraticOut,
        );
        target
    }

    /// Animation frame at page time `now_ms`. The first frame advances nothing.
    pub fn on_frame(&mut self, now_ms: f64) -> (FrameSnapshot, Effects) {
        let dt_ms = self
            .last_frame_ms
            .map(|prev| (now_ms - prev).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);

        let outcome = self.orbit.frame(now_ms, dt_ms);
        let scale = &mut self.box_scale;
        self.scale_tween.advance(dt_ms, |_, v| *scale = v);

        let mut effects = Effects::new();
        for e in outcome.effects {
            match e {
                OrbitEffect::PlayVideo => effects.push(Effect::PlayVideo),
            }
        }
        let snapshot = FrameSnapshot {
            camera: outcome.pose,
            box_position: self.orbit.params().subject,
            box_scale: self.box_scale,
            video_ready: self.video_ready && !self.is_degraded(AssetId::Video),
        };
        (snapshot, effects)
    }

    pub fn set_video_ready(&mut self, ready: bool) {
        if ready && !self.video_ready {
            log::info!("[session] video frames available");
        }
        self.video_ready = ready;
    }

    /// Record a failed asset. The affected feature degrades; nothing stops.
    pub fn report_asset_failure(&mut self, failure: AssetLoadFailure) {
        log::warn!("[session] {}", failure);
        if !self.degraded.contains(&failure.asset) {
            self.degraded.push(failure.asset);
        }
    }

    pub fn is_degraded(&self, asset: AssetId) -> bool {
        self.degraded.contains(&asset)
    }
}
