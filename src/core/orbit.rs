// Camera orbit state machine.
//
// The camera circles the box at a radius that swings back and forth by a
// fixed delta, one linear leg at a time. A one-shot opening sequence lowers
// the camera and slows the orbit after the first user gesture; when the
// slow-down completes the video is asked to start.
//
// Radius legs are guarded by an explicit [`TransitionStatus`] plus a
// scheduled flag, so a per-frame check can never start a second leg while
// one is in flight or waiting for its flip.

use super::camera::CameraPose;
use super::constants::*;
use super::tween::{Easing, Tweener};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadiusDirection {
    Increasing,
    Decreasing,
}

impl RadiusDirection {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            RadiusDirection::Increasing => RadiusDirection::Decreasing,
            RadiusDirection::Decreasing => RadiusDirection::Increasing,
        }
    }

    #[inline]
    fn sign(self) -> f32 {
        match self {
            RadiusDirection::Increasing => 1.0,
            RadiusDirection::Decreasing => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStatus {
    Idle,
    Running(RadiusDirection),
    /// The leg finished; the direction flip has not been applied yet.
    PendingFlip(RadiusDirection),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrbitChannel {
    Radius,
    CameraHeight,
    AngularSpeed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitEffect {
    PlayVideo,
}

pub type OrbitEffects = SmallVec<[OrbitEffect; 2]>;

#[derive(Clone, Debug)]
pub struct OrbitParams {
    pub initial_radius: f32,
    pub radius_delta: f32,
    pub radius_leg_ms: f64,
    pub initial_angular_speed: f32,
    pub final_angular_speed: f32,
    pub initial_height: f32,
    pub final_height: f32,
    pub opening_ms: f64,
    pub subject: Vec3,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            initial_radius: ORBIT_INITIAL_RADIUS,
            radius_delta: ORBIT_RADIUS_DELTA,
            radius_leg_ms: ORBIT_RADIUS_LEG_MS,
            initial_angular_speed: ORBIT_INITIAL_ANGULAR_SPEED,
            final_angular_speed: ORBIT_FINAL_ANGULAR_SPEED,
            initial_height: CAMERA_INITIAL_HEIGHT,
            final_height: CAMERA_FINAL_HEIGHT,
            opening_ms: OPENING_DURATION_MS,
            subject: Vec3::from_array(BOX_POSITION),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitState {
    pub radius: f32,
    pub radius_direction: RadiusDirection,
    pub orbit_angular_speed: f32,
    pub camera_height: f32,
    pub camera_animating: bool,
}

#[derive(Clone, Debug)]
pub struct FrameOutcome {
    pub pose: CameraPose,
    pub effects: OrbitEffects,
}

pub struct OrbitController {
    params: OrbitParams,
    state: OrbitState,
    status: TransitionStatus,
    radius_scheduled: bool,
    // time the previous leg ran past its end, credited to the next leg
    radius_carry_ms: f64,
    video_requested: bool,
    tweens: Tweener<OrbitChannel, f32>,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitParams::default())
    }
}

impl OrbitController {
    pub fn new(params: OrbitParams) -> Self {
        let state = OrbitState {
            radius: params.initial_radius,
            radius_direction: RadiusDirection::Increasing,
            orbit_angular_speed: params.initial_angular_speed,
            camera_height: params.initial_height,
            camera_animating: false,
        };
        Self {
            params,
            state,
            status: TransitionStatus::Idle,
            radius_scheduled: false,
            radius_carry_ms: 0.0,
            video_requested: false,
            tweens: Tweener::new(),
        }
    }

    pub fn params(&self) -> &OrbitParams {
        &self.params
    }

    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    pub fn status(&self) -> TransitionStatus {
        self.status
    }

    pub fn is_radius_scheduled(&self) -> bool {
        self.radius_scheduled
    }

    pub fn is_animating(&self, channel: OrbitChannel) -> bool {
        self.tweens.is_active(channel)
    }

    /// Camera placement for elapsed time `t_ms` under the current state.
    pub fn pose_at(&self, t_ms: f64) -> CameraPose {
        let theta = t_ms * self.state.orbit_angular_speed as f64;
        let r = self.state.radius;
        CameraPose {
            eye: Vec3::new(
                r * theta.cos() as f32,
                self.state.camera_height,
                r * theta.sin() as f32,
            ),
            target: self.params.subject,
        }
    }

    /// One display-refresh step: place the camera, keep the radius legs
    /// alternating, then advance every transition by `dt_ms`.
    pub fn frame(&mut self, t_ms: f64, dt_ms: f64) -> FrameOutcome {
        let pose = self.pose_at(t_ms);
        self.check_radius();
        let effects = self.advance(dt_ms);
        FrameOutcome { pose, effects }
    }

    /// Start the opening sequence. Returns false if it already ran.
    pub fn start_animation(&mut self) -> bool {
        if self.state.camera_animating {
            return false;
        }
        self.state.camera_animating = true;
        let ms = self.params.opening_ms;
        self.tweens.start(
            OrbitChannel::CameraHeight,
            self.state.camera_height,
            self.params.final_height,
            ms,
            Easing::Linear,
        );
        self.tweens.start(
            OrbitChannel::AngularSpeed,
            self.state.orbit_angular_speed,
            self.params.final_angular_speed,
            ms,
            Easing::Linear,
        );
        log::info!("[orbit] opening sequence started ({} ms)", ms);
        true
    }

    fn check_radius(&mut self) {
        if self.radius_scheduled || self.status != TransitionStatus::Idle {
            return;
        }
        let dir = self.state.radius_direction;
        let from = self.state.radius;
        let to = from + dir.sign() * self.params.radius_delta;
        self.tweens.start(
            OrbitChannel::Radius,
            from,
            to,
            self.params.radius_leg_ms,
            Easing::Linear,
        );
        let carry = std::mem::take(&mut self.radius_carry_ms);
        if carry > 0.0 {
            self.tweens
                .fast_forward(OrbitChannel::Radius, carry.min(self.params.radius_leg_ms));
        }
        self.status = TransitionStatus::Running(dir);
        self.radius_scheduled = true;
        log::debug!("[orbit] radius leg {:?} {:.2} -> {:.2}", dir, from, to);
    }

    fn advance(&mut self, dt_ms: f64) -> OrbitEffects {
        let state = &mut self.state;
        let done = self.tweens.advance(dt_ms, |channel, v| match channel {
            OrbitChannel::Radius => state.radius = v,
            OrbitChannel::CameraHeight => state.camera_height = v,
            OrbitChannel::AngularSpeed => state.orbit_angular_speed = v,
        });

        let mut effects = OrbitEffects::new();
        for channel in done {
            match channel {
                OrbitChannel::Radius => {
                    if let TransitionStatus::Running(dir) = self.status {
                        self.status = TransitionStatus::PendingFlip(dir);
                        self.radius_carry_ms = self.tweens.overshoot_ms(OrbitChannel::Radius);
                    }
                }
                OrbitChannel::AngularSpeed => {
                    if !self.video_requested {
                        self.video_requested = true;
                        effects.push(OrbitEffect::PlayVideo);
                        log::info!("[orbit] slow-down finished, requesting video");
                    }
                }
                OrbitChannel::CameraHeight => {
                    log::debug!("[orbit] camera height settled at {:.2}", self.state.camera_height);
                }
            }
        }
        self.settle_flip();
        effects
    }

    fn settle_flip(&mut self) {
        if let TransitionStatus::PendingFlip(dir) = self.status {
            self.state.radius_direction = dir.flipped();
            self.radius_scheduled = false;
            self.status = TransitionStatus::Idle;
            log::debug!(
                "[orbit] radius {:.2} reached, now {:?}",
                self.state.radius,
                self.state.radius_direction
            );
        }
    }
}
