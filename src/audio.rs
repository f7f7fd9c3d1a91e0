use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING, PARTICLE_SEED, TRACK_GAIN};
use crate::core::{
    ObjectId, ParticleConfig, ParticleCue, ParticleSystem, PositionSource, TrackingListener,
};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

// Media element -> analyser -> gain -> destination
struct TrackNodes {
    element: web::HtmlAudioElement,
    analyser: web::AnalyserNode,
    _source: web::MediaElementAudioSourceNode,
    _gain: web::GainNode,
}

/// Audio + particle cue played while the camera follows an object.
pub struct AudioCue {
    audio_ctx: web::AudioContext,
    track: Option<TrackNodes>,
    spectrum: Vec<u8>,
    particles: ParticleCue,
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(anyhow::anyhow!("{} GainNode error", label))
        }
    }
}

fn build_track(audio_ctx: &web::AudioContext, url: &str) -> anyhow::Result<TrackNodes> {
    let element =
        web::HtmlAudioElement::new_with_src(url).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    element.set_loop(true);
    element.set_cross_origin(Some("anonymous"));
    let source = audio_ctx
        .create_media_element_source(&element)
        .map_err(|e| anyhow::anyhow!("MediaElementAudioSourceNode error: {:?}", e))?;
    let analyser = web::AnalyserNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("AnalyserNode error: {:?}", e))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
    let gain = create_gain(audio_ctx, TRACK_GAIN, "Track")?;

    _ = source.connect_with_audio_node(&analyser);
    _ = analyser.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(&audio_ctx.destination());

    Ok(TrackNodes {
        element,
        analyser,
        _source: source,
        _gain: gain,
    })
}

impl AudioCue {
    /// A missing or broken track still leaves the particle cue working.
    pub fn new(audio_ctx: web::AudioContext, url: &str) -> anyhow::Result<Self> {
        let track = match build_track(&audio_ctx, url) {
            Ok(t) => Some(t),
            Err(e) => {
                log::error!("[audio] track setup failed: {:?}", e);
                None
            }
        };
        let bins = track
            .as_ref()
            .map(|t| t.analyser.frequency_bin_count() as usize)
            .unwrap_or(0);
        let system = ParticleSystem::new(ParticleConfig::default(), PARTICLE_SEED)
            .map_err(|e| anyhow::anyhow!("particle system: {}", e))?;
        Ok(Self {
            audio_ctx,
            track,
            spectrum: vec![0; bins],
            particles: ParticleCue::new(system),
        })
    }

    pub fn particles(&self) -> &ParticleSystem {
        self.particles.system()
    }

    /// Sample the analyser and advance the particle emitter by one frame.
    pub fn tick(&mut self, dt_sec: f32, objects: &impl PositionSource) {
        match &self.track {
            Some(t) if !t.element.paused() => t.analyser.get_byte_frequency_data(&mut self.spectrum),
            _ => self.spectrum.fill(0),
        }
        self.particles.update(dt_sec, &self.spectrum, objects);
    }
}

impl TrackingListener for AudioCue {
    fn on_tracking_started(&mut self, target: ObjectId) {
        _ = self.audio_ctx.resume();
        if let Some(t) = &self.track {
            t.element.set_current_time(0.0);
            match t.element.play() {
                Ok(promise) => spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("[audio] play rejected: {:?}", e);
                    }
                }),
                Err(e) => log::warn!("[audio] play error: {:?}", e),
            }
        }
        self.particles.on_tracking_started(target);
        log::info!("[audio] cue started on {}", target);
    }

    fn on_tracking_stopped(&mut self) {
        if let Some(t) = &self.track {
            _ = t.element.pause();
        }
        self.particles.on_tracking_stopped();
        log::info!("[audio] cue stopped");
    }
}
