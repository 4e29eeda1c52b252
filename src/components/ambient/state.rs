//! Frame loop lifecycle for one animated surface.
//!
//! [`FrameLoop`] is a small state machine fed by two events, "frame ready" and
//! "resized", which the browser delivers strictly one after another. It owns the
//! scene and decides whether another frame should be requested; the browser
//! glue in `mount` only carries those decisions out.
//!
//! ```text
//! Idle --mount--> Seeding --> Running --teardown--> TornDown
//! ```

use log::debug;

use super::render::Painter;

/// An animated entity population that can paint itself.
pub trait Scene {
	/// First population for a freshly mounted surface.
	fn seed(&mut self, width: f64, height: f64);

	/// Surface size changed while running.
	fn resize(&mut self, width: f64, height: f64);

	/// Paints the current state. `t` is seconds since the loop started.
	fn paint<P: Painter>(&self, painter: &mut P, t: f64);

	/// Advances every entity by one tick.
	fn advance(&mut self);
}

/// Lifecycle phase of a [`FrameLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Not mounted yet.
	Idle,
	/// Sizing and populating the scene.
	Seeding,
	/// Painting on every frame (or frozen after one paint under reduced motion).
	Running,
	/// Unmounted. No further frames or resizes are processed.
	TornDown,
}

/// What the host should do after an event has been handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
	/// Request another animation frame.
	Next,
	/// Do not request a frame.
	Idle,
}

/// Drives a [`Scene`] through mount, per-frame ticks, resizes and teardown.
pub struct FrameLoop<S> {
	scene: S,
	phase: Phase,
	reduced_motion: bool,
	started_at: f64,
	pending: Option<i32>,
	listening: bool,
	frames: u64,
}

impl<S: Scene> FrameLoop<S> {
	pub fn new(scene: S, reduced_motion: bool) -> Self {
		Self {
			scene,
			phase: Phase::Idle,
			reduced_motion,
			started_at: 0.0,
			pending: None,
			listening: false,
			frames: 0,
		}
	}

	pub fn scene(&self) -> &S {
		&self.scene
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Whether the resize listener should currently be attached.
	pub fn is_listening(&self) -> bool {
		self.listening
	}

	/// Handle of the frame requested from the host and not yet delivered.
	pub fn pending_frame(&self) -> Option<i32> {
		self.pending
	}

	/// Frames painted so far, including the single reduced-motion paint.
	pub fn frames_painted(&self) -> u64 {
		self.frames
	}

	/// Seeds the scene and starts the loop at `now_ms`.
	///
	/// Under reduced motion the scene is painted once here and no frame is
	/// requested. Mounting anything but an idle loop does nothing.
	pub fn mount<P: Painter>(
		&mut self,
		width: f64,
		height: f64,
		now_ms: f64,
		painter: &mut P,
	) -> FrameRequest {
		if self.phase != Phase::Idle {
			return FrameRequest::Idle;
		}

		self.phase = Phase::Seeding;
		self.scene.seed(width, height);
		self.listening = true;
		self.started_at = now_ms;
		self.phase = Phase::Running;

		if self.reduced_motion {
			debug!("ambient: reduced motion, painting a single static frame");
			self.paint(now_ms, painter);
			FrameRequest::Idle
		} else {
			FrameRequest::Next
		}
	}

	/// Records the handle of a frame the host has just requested.
	pub fn frame_scheduled(&mut self, handle: i32) {
		if self.phase == Phase::Running {
			self.pending = Some(handle);
		}
	}

	/// Handles a delivered animation frame: paint, then advance.
	pub fn frame<P: Painter>(&mut self, now_ms: f64, painter: &mut P) -> FrameRequest {
		self.pending = None;
		if self.phase != Phase::Running {
			return FrameRequest::Idle;
		}

		self.paint(now_ms, painter);
		if self.reduced_motion {
			return FrameRequest::Idle;
		}
		self.scene.advance();
		FrameRequest::Next
	}

	/// Applies a new surface size.
	///
	/// A frozen (reduced-motion) surface asks for one repaint, since resizing
	/// the canvas wipes it.
	pub fn resize(&mut self, width: f64, height: f64) -> FrameRequest {
		if self.phase != Phase::Running || !self.listening {
			return FrameRequest::Idle;
		}
		self.scene.resize(width, height);

		if self.reduced_motion && self.pending.is_none() {
			FrameRequest::Next
		} else {
			FrameRequest::Idle
		}
	}

	/// Stops the loop. Returns the pending frame handle the host must cancel.
	pub fn teardown(&mut self) -> Option<i32> {
		self.phase = Phase::TornDown;
		self.listening = false;
		self.pending.take()
	}

	fn paint<P: Painter>(&mut self, now_ms: f64, painter: &mut P) {
		let t = ((now_ms - self.started_at) / 1000.0).max(0.0);
		self.scene.paint(painter, t);
		self.frames += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::super::config::{ParticleConfig, StarfieldConfig};
	use super::super::particles::ParticleSystem;
	use super::super::render::recorder::{Op, Recorder};
	use super::super::starfield::StarField;
	use super::super::theme::Palette;
	use super::*;

	fn stars() -> StarField {
		StarField::new(StarfieldConfig::default(), Palette::default(), 17)
	}

	/// Plays the host's part: hands out frame handles and delivers frames.
	fn run_frames<S: Scene>(fl: &mut FrameLoop<S>, rec: &mut Recorder, count: usize) -> usize {
		let mut delivered = 0;
		let mut handle = 100;
		for i in 0..count {
			if fl.pending_frame().is_none() {
				break;
			}
			if fl.frame(1000.0 + i as f64 * 16.0, rec) == FrameRequest::Next {
				handle += 1;
				fl.frame_scheduled(handle);
			}
			delivered += 1;
		}
		delivered
	}

	#[test]
	fn mount_seeds_and_runs_until_teardown() {
		let mut fl = FrameLoop::new(stars(), false);
		let mut rec = Recorder::default();
		assert_eq!(fl.phase(), Phase::Idle);
		assert!(!fl.is_listening());

		assert_eq!(fl.mount(1400.0, 900.0, 1000.0, &mut rec), FrameRequest::Next);
		assert_eq!(fl.phase(), Phase::Running);
		assert_eq!(fl.scene().stars().len(), 90);
		assert!(fl.is_listening());
		assert!(rec.ops.is_empty());
		fl.frame_scheduled(1);

		assert_eq!(run_frames(&mut fl, &mut rec, 30), 30);
		assert_eq!(fl.frames_painted(), 30);
		assert_eq!(rec.count(|op| matches!(op, Op::Clear(..))), 30);
		assert!(fl.pending_frame().is_some());

		let cancelled = fl.teardown();
		assert!(cancelled.is_some());
		assert_eq!(fl.phase(), Phase::TornDown);
		assert!(!fl.is_listening());
		assert_eq!(fl.pending_frame(), None);

		assert_eq!(fl.frame(5000.0, &mut rec), FrameRequest::Idle);
		assert_eq!(fl.frames_painted(), 30);
		assert_eq!(fl.resize(10.0, 10.0), FrameRequest::Idle);
		assert_eq!(fl.scene().stars().len(), 90);
	}

	#[test]
	fn reduced_motion_paints_once_and_schedules_nothing() {
		let mut fl = FrameLoop::new(stars(), true);
		let mut rec = Recorder::default();

		assert_eq!(fl.mount(800.0, 600.0, 42.0, &mut rec), FrameRequest::Idle);
		assert_eq!(fl.frames_painted(), 1);
		assert_eq!(fl.pending_frame(), None);
		assert!(fl.is_listening());

		let before = fl.scene().stars().to_vec();
		assert_eq!(fl.teardown(), None);
		assert_eq!(fl.scene().stars(), &before[..]);
	}

	#[test]
	fn reduced_motion_repaints_once_after_resize() {
		let mut fl = FrameLoop::new(stars(), true);
		let mut rec = Recorder::default();
		fl.mount(800.0, 600.0, 0.0, &mut rec);

		assert_eq!(fl.resize(2560.0, 1440.0), FrameRequest::Next);
		assert_eq!(fl.scene().stars().len(), 160);
		fl.frame_scheduled(7);
		assert_eq!(fl.resize(2560.0, 1440.0), FrameRequest::Idle);

		let before = fl.scene().stars().to_vec();
		assert_eq!(fl.frame(500.0, &mut rec), FrameRequest::Idle);
		assert_eq!(fl.frames_painted(), 2);
		assert_eq!(fl.scene().stars(), &before[..]);
	}

	#[test]
	fn resize_while_running_reseeds_before_next_frame() {
		let mut fl = FrameLoop::new(stars(), false);
		let mut rec = Recorder::default();
		fl.mount(1400.0, 900.0, 0.0, &mut rec);
		fl.frame_scheduled(1);

		assert_eq!(fl.resize(200.0, 200.0), FrameRequest::Idle);
		assert_eq!(fl.scene().stars().len(), 55);
		assert_eq!(fl.resize(200.0, 200.0), FrameRequest::Idle);
		assert_eq!(fl.scene().stars().len(), 55);

		fl.frame(16.0, &mut rec);
		assert_eq!(rec.ops[0], Op::Clear(200.0, 200.0));
		assert_eq!(rec.count(|op| matches!(op, Op::Disc { .. })), 55);
	}

	#[test]
	fn mount_is_only_honoured_once() {
		let mut fl = FrameLoop::new(stars(), false);
		let mut rec = Recorder::default();
		fl.mount(1400.0, 900.0, 0.0, &mut rec);
		assert_eq!(fl.mount(200.0, 200.0, 0.0, &mut rec), FrameRequest::Idle);
		assert_eq!(fl.scene().stars().len(), 90);

		fl.teardown();
		assert_eq!(fl.mount(200.0, 200.0, 0.0, &mut rec), FrameRequest::Idle);
		assert_eq!(fl.phase(), Phase::TornDown);
	}

	#[test]
	fn elapsed_time_is_measured_from_mount() {
		let mut fl = FrameLoop::new(stars(), false);
		let mut rec = Recorder::default();
		fl.mount(300.0, 300.0, 5000.0, &mut rec);
		fl.frame(7000.0, &mut rec);

		let star = &stars_after_seed(300.0, 300.0)[0];
		let expected = star.frame_alpha(2.0);
		match &rec.ops[3] {
			Op::Disc { alpha, .. } => assert!((alpha - expected).abs() < 1e-12),
			other => panic!("expected star core, got {other:?}"),
		}
	}

	fn stars_after_seed(w: f64, h: f64) -> Vec<super::super::starfield::Star> {
		let mut sf = stars();
		sf.seed(w, h);
		sf.stars().to_vec()
	}

	#[test]
	fn particle_surface_keeps_emitting() {
		let scene = ParticleSystem::new(
			ParticleConfig {
				spawn_chance: 1.0,
				..ParticleConfig::default()
			},
			Palette::default(),
			3,
		);
		let mut fl = FrameLoop::new(scene, false);
		let mut rec = Recorder::default();

		assert_eq!(fl.mount(640.0, 360.0, 0.0, &mut rec), FrameRequest::Next);
		assert_eq!(fl.scene().particles().len(), 6);
		fl.frame_scheduled(1);

		assert_eq!(run_frames(&mut fl, &mut rec, 20), 20);
		assert!(fl.scene().particles().len() <= 40);
		assert!(fl.scene().particles().len() > 6);
		assert_eq!(rec.count(|op| matches!(op, Op::Wash { .. })), 20);

		fl.resize(100.0, 100.0);
		assert!(!fl.scene().particles().is_empty());
	}

	#[test]
	fn particle_surface_honours_reduced_motion() {
		let scene = ParticleSystem::new(ParticleConfig::default(), Palette::default(), 3);
		let mut fl = FrameLoop::new(scene, true);
		let mut rec = Recorder::default();

		assert_eq!(fl.mount(640.0, 360.0, 0.0, &mut rec), FrameRequest::Idle);
		assert_eq!(rec.count(|op| matches!(op, Op::GlowDisc { .. })), 6);
		assert_eq!(fl.pending_frame(), None);
	}
}
