//! Cue tones, synthesised as in-memory WAV clips so no asset files ship.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};
use snake_arcade::Cue;

const SAMPLE_RATE: u32 = 44_100;

/// (frequency Hz, length s, mix level) per cue.
fn tone(cue: Cue) -> (f32, f32, f32) {
    match cue {
        Cue::Eat => (880.0, 0.08, 0.4),
        Cue::Move => (220.0, 0.02, 0.05),
        Cue::GameOver => (110.0, 0.35, 0.6),
        Cue::Combo => (1320.0, 0.10, 0.4),
        Cue::Achievement => (1760.0, 0.20, 0.45),
        Cue::PowerUpCollect => (1320.0, 0.06, 0.4),
        Cue::PowerUpActivate => (660.0, 0.15, 0.45),
        Cue::LevelUp => (990.0, 0.18, 0.45),
    }
}

/// Mono PCM16 sine with a short linear fade-out to avoid clicks.
fn sine_wav(frequency_hz: f32, duration_s: f32) -> Vec<u8> {
    let samples = (duration_s * SAMPLE_RATE as f32) as u32;
    let data_size = samples * 2;
    let mut wav = Vec::with_capacity(44 + data_size as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());

    let fade_from = samples.saturating_sub(SAMPLE_RATE / 100);
    for n in 0..samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let fade = if n > fade_from {
            (samples - n) as f32 / (samples - fade_from) as f32
        } else {
            1.0
        };
        let s = 0.7 * fade * (std::f32::consts::TAU * frequency_hz * t).sin();
        wav.extend_from_slice(&((s * i16::MAX as f32) as i16).to_le_bytes());
    }
    wav
}

pub struct CueBank {
    sounds: HashMap<Cue, (Sound, f32)>,
}

impl CueBank {
    pub async fn load() -> Result<Self> {
        let mut sounds = HashMap::new();
        for cue in Cue::ALL {
            let (freq, len, level) = tone(cue);
            let sound = load_sound_from_bytes(&sine_wav(freq, len))
                .await
                .map_err(|e| anyhow!("failed to load {cue:?} cue: {e:?}"))?;
            sounds.insert(cue, (sound, level));
        }
        Ok(Self { sounds })
    }

    pub fn play(&self, cue: Cue, volume: f32) {
        if let Some((sound, level)) = self.sounds.get(&cue) {
            audio::play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: level * volume.clamp(0.0, 1.0),
                },
            );
        }
    }

    pub fn stop_all(&self) {
        for (sound, _) in self.sounds.values() {
            audio::stop_sound(sound);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_matches_payload() {
        let wav = sine_wav(440.0, 0.01);
        assert_eq!(&wav[0..4], b"RIFF");
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(wav.len(), 44 + data_size as usize);
    }
}
