use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{TranscriptionEngine, TranscriptionError, WHISPER_SAMPLE_RATE};
use crate::domain::Transcript;
use crate::infrastructure::device::ComputeDevice;

use super::audio_decoder::decode_audio_to_pcm;

const MAX_DECODE_TOKENS: usize = 224;

const LANGUAGE_CODES: [&str; 99] = [
    "en", "zh", "de", "es", "ru", "ko", "fr", "ja", "pt", "tr", "pl", "ca", "nl", "ar", "sv", "it",
    "id", "hi", "fi", "vi", "he", "uk", "el", "ms", "cs", "ro", "da", "hu", "ta", "no", "th", "ur",
    "hr", "bg", "lt", "la", "mi", "ml", "cy", "sk", "te", "fa", "lv", "bn", "sr", "az", "sl", "kn",
    "et", "mk", "br", "eu", "is", "hy", "ne", "mn", "bs", "kk", "sq", "sw", "gl", "mr", "pa", "si",
    "km", "sn", "yo", "so", "af", "oc", "ka", "be", "tg", "sd", "gu", "am", "yi", "lo", "uz", "fo",
    "ht", "ps", "tk", "nn", "mt", "sa", "lb", "my", "bo", "tl", "mg", "as", "tt", "haw", "ln", "ha",
    "ba", "jw", "su",
];

/// Local Whisper inference. Decoding runs on the blocking pool so model
/// work never occupies a runtime worker.
pub struct CandleWhisperEngine {
    runtime: Arc<WhisperRuntime>,
}

struct WhisperRuntime {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    language_tokens: Vec<(&'static str, u32)>,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str, compute: ComputeDevice) -> Result<Self, TranscriptionError> {
        let device = compute
            .to_candle()
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("device: {}", e)))?;

        tracing::info!(
            device = %compute,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        // large-v3 checkpoints use 128 mel bins, everything older uses 80
        let mel_file = match config.num_mel_bins {
            128 => "melfilters128.bytes",
            _ => "melfilters.bytes",
        };
        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get(mel_file)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", mel_file, e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        let language_tokens = LANGUAGE_CODES
            .iter()
            .filter_map(|code| {
                tokenizer
                    .token_to_id(&format!("<|{}|>", code))
                    .map(|id| (*code, id))
            })
            .collect::<Vec<_>>();

        tracing::info!(
            languages = language_tokens.len(),
            "Candle Whisper engine loaded successfully"
        );

        Ok(Self {
            runtime: Arc::new(WhisperRuntime {
                model: Mutex::new(model),
                tokenizer,
                config,
                device,
                mel_filters,
                language_tokens,
            }),
        })
    }
}

impl WhisperRuntime {
    fn mel_segments(&self, pcm: &[f32]) -> Result<Vec<Tensor>, TranscriptionError> {
        let chunk_samples = m::N_SAMPLES;
        let n_mel = self.config.num_mel_bins;

        pcm.chunks(chunk_samples)
            .map(|chunk| {
                let mut samples = chunk.to_vec();
                samples.resize(chunk_samples, 0.0);

                let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
                let n_frames = mel_data.len() / n_mel;

                Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device).map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e))
                })
            })
            .collect()
    }

    fn transcribe_blocking(&self, audio_data: &[u8]) -> Result<Transcript, TranscriptionError> {
        let pcm = decode_audio_to_pcm(audio_data)
            .map_err(|e| TranscriptionError::DecodingFailed(e.to_string()))?;
        let duration_secs = pcm.len() as f64 / WHISPER_SAMPLE_RATE as f64;

        let mel_tensors = self.mel_segments(&pcm)?;

        let mut model = self.model.lock().map_err(|_| {
            TranscriptionError::TranscriptionFailed("whisper model lock poisoned".to_string())
        })?;
        let mut language: Option<(&'static str, u32)> = None;
        let mut segments: Vec<String> = Vec::new();

        for (i, mel) in mel_tensors.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio segment");

            let audio_features = model
                .encoder
                .forward(mel, true)
                .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))?;

            if language.is_none() {
                language = detect_language(
                    &mut model,
                    &self.tokenizer,
                    &self.device,
                    &audio_features,
                    &self.language_tokens,
                )?;
            }

            let text = decode_segment(
                &mut model,
                &self.tokenizer,
                &self.device,
                &audio_features,
                language.map(|(_, token)| token),
            )?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        let transcript = Transcript::new(
            segments.join(" "),
            language.map(|(code, _)| code).unwrap_or("en"),
            duration_secs,
        );

        tracing::info!(
            segments = segments.len(),
            chars = transcript.text.len(),
            language = %transcript.language,
            "Audio transcription completed"
        );

        Ok(transcript)
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<Transcript, TranscriptionError> {
        let runtime = Arc::clone(&self.runtime);
        let audio = audio_data.to_vec();

        tokio::task::spawn_blocking(move || runtime.transcribe_blocking(&audio))
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("inference task: {}", e)))?
    }
}

/// Picks the language token with the highest logit after the start token.
/// English-only checkpoints carry no language tokens and yield `None`.
fn detect_language(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    audio_features: &Tensor,
    language_tokens: &[(&'static str, u32)],
) -> Result<Option<(&'static str, u32)>, TranscriptionError> {
    if language_tokens.is_empty() {
        return Ok(None);
    }

    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let tokens = Tensor::new([sot_token].as_slice(), device)
        .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
        .unsqueeze(0)
        .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

    let decoder_output = model
        .decoder
        .forward(&tokens, audio_features, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

    let logits = model
        .decoder
        .final_linear(
            &decoder_output
                .squeeze(0)
                .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?,
        )
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?
        .get(0)
        .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
        .to_vec1::<f32>()
        .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

    model.reset_kv_cache();

    Ok(language_tokens
        .iter()
        .filter_map(|&(code, id)| logits.get(id as usize).map(|&score| (code, id, score)))
        .max_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(code, id, _)| (code, id)))
}

fn decode_segment(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    audio_features: &Tensor,
    language_token: Option<u32>,
) -> Result<String, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;

    let mut tokens = vec![sot_token];
    tokens.extend(language_token);
    tokens.extend([transcribe_token, no_timestamps_token]);
    let prompt_len = tokens.len();

    let mut decoded_text = String::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .unsqueeze(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let decoder_output = model
            .decoder
            .forward(&token_tensor, audio_features, tokens.len() == prompt_len)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

        let logits = model
            .decoder
            .final_linear(
                &decoder_output
                    .squeeze(0)
                    .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?,
            )
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

        let seq_len = logits
            .dim(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;
        let next_token = logits
            .get(seq_len - 1)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .argmax(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .to_scalar::<u32>()
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        if next_token == eot_token {
            break;
        }

        tokens.push(next_token);

        if let Some(text) = tokenizer.id_to_token(next_token) {
            decoded_text.push_str(&text.replace('Ġ', " ").replace('▁', " "));
        }
    }

    model.reset_kv_cache();

    Ok(decoded_text.trim().to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
