use sphere_core::{AudioFrame, AudioFrameError};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const FFT_SIZE: u32 = 1024;
const ANALYSER_SMOOTHING: f64 = 0.65;

#[derive(Debug, Error)]
pub enum MicError {
    #[error("getUserMedia is not available")]
    Unsupported,

    #[error("microphone access denied: {0}")]
    Denied(String),

    #[error("audio graph error: {0}")]
    Graph(String),

    #[error(transparent)]
    Frame(#[from] AudioFrameError),
}

fn graph_err(e: JsValue) -> MicError {
    MicError::Graph(format!("{:?}", e))
}

/// Live microphone routed into an analyser, plus the reused frame buffers.
pub struct MicInput {
    audio_ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    stream: web::MediaStream,
    frame: AudioFrame,
}

impl MicInput {
    /// Ask for the microphone with browser processing disabled.
    pub async fn start() -> Result<Self, MicError> {
        let window = web::window().ok_or(MicError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| MicError::Unsupported)?;

        let audio = js_sys::Object::new();
        for key in ["echoCancellation", "noiseSuppression", "autoGainControl"] {
            let _ = js_sys::Reflect::set(&audio, &JsValue::from_str(key), &JsValue::FALSE);
        }
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&audio.into());
        constraints.set_video(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| MicError::Denied(format!("{:?}", e)))?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(|e| MicError::Denied(format!("{:?}", e)))?
            .dyn_into()
            .map_err(graph_err)?;

        let audio_ctx = web::AudioContext::new().map_err(graph_err)?;
        let built = Self::wire(&audio_ctx, &stream);
        match built {
            Ok((analyser, frame)) => {
                log::info!(
                    "[mic] analyser fft={} bins={}",
                    analyser.fft_size(),
                    analyser.frequency_bin_count()
                );
                Ok(Self {
                    audio_ctx,
                    analyser,
                    stream,
                    frame,
                })
            }
            Err(e) => {
                let _ = audio_ctx.close();
                stop_tracks(&stream);
                Err(e)
            }
        }
    }

    fn wire(
        audio_ctx: &web::AudioContext,
        stream: &web::MediaStream,
    ) -> Result<(web::AnalyserNode, AudioFrame), MicError> {
        let source = audio_ctx
            .create_media_stream_source(stream)
            .map_err(graph_err)?;
        let analyser = web::AnalyserNode::new(audio_ctx).map_err(graph_err)?;
        analyser.set_fft_size(FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        let _ = source
            .connect_with_audio_node(&analyser)
            .map_err(graph_err)?;
        let frame = AudioFrame::silent(analyser.fft_size() as usize)?;
        Ok((analyser, frame))
    }

    /// Last snapshot pulled by [`MicInput::refresh`].
    #[inline]
    pub fn frame(&self) -> &AudioFrame {
        &self.frame
    }

    /// Pull the latest analyser snapshot into the reused frame.
    pub fn refresh(&mut self) -> &AudioFrame {
        let (time, freq) = self.frame.buffers_mut();
        self.analyser.get_byte_time_domain_data(time);
        self.analyser.get_byte_frequency_data(freq);
        &self.frame
    }

    pub fn suspend(&self) {
        if self.audio_ctx.state() == web::AudioContextState::Running {
            if let Err(e) = self.audio_ctx.suspend() {
                log::error!("[mic] suspend error: {:?}", e);
            }
        }
    }

    pub fn resume(&self) {
        if self.audio_ctx.state() == web::AudioContextState::Suspended {
            if let Err(e) = self.audio_ctx.resume() {
                log::error!("[mic] resume error: {:?}", e);
            }
        }
    }

    /// Close the context and stop every capture track.
    pub fn close(self) {
        if let Err(e) = self.audio_ctx.close() {
            log::error!("[mic] close error: {:?}", e);
        }
        stop_tracks(&self.stream);
        log::info!("[mic] closed");
    }
}

fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}
