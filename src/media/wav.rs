use crate::{Error, Result, Slots, SlotsMut};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pcm {
    I8(Vec<i8>),
    I16(Vec<i16>),
}

/// Integer PCM audio with 8- or 16-bit samples.
///
/// Samples are addressed in their interleaved file order, so a stereo file
/// alternates left and right slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wav {
    spec: WavSpec,
    pcm: Pcm,
}

impl Wav {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = WavReader::new(BufReader::new(File::open(path)?))?;
        Self::from_reader(reader)
    }

    /// Decodes an in-memory WAV file.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(WavReader::new(Cursor::new(bytes))?)
    }

    fn from_reader<R: Read>(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();

        let pcm = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => {
                Pcm::I8(reader.into_samples::<i8>().collect::<Result<_, _>>()?)
            }
            (SampleFormat::Int, 16) => {
                Pcm::I16(reader.into_samples::<i16>().collect::<Result<_, _>>()?)
            }
            (format, bits) => {
                return Err(Error::UnsupportedMedium(format!(
                    "{bits}-bit {format:?} WAV, only 8- and 16-bit integer PCM is supported"
                )))
            }
        };

        Ok(Self { spec, pcm })
    }

    /// Creates single-channel 16-bit audio from raw samples.
    #[must_use]
    pub fn mono16(samples: Vec<i16>, sample_rate: u32) -> Self {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        Self {
            spec,
            pcm: Pcm::I16(samples),
        }
    }

    pub(crate) fn accepts(path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                extension.eq_ignore_ascii_case("wav") || extension.eq_ignore_ascii_case("wave")
            })
    }

    #[must_use]
    pub fn spec(&self) -> &WavSpec {
        &self.spec
    }

    /// Returns the samples of 16-bit audio, or `None` for 8-bit audio.
    #[must_use]
    pub fn samples16(&self) -> Option<&[i16]> {
        match &self.pcm {
            Pcm::I16(samples) => Some(samples.as_slice()),
            Pcm::I8(_) => None,
        }
    }

    /// Returns the duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        let frames = self.len() / usize::from(self.spec.channels.max(1));
        frames as f64 / f64::from(self.spec.sample_rate)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write(BufWriter::new(File::create(path)?))
    }

    pub fn to_wav_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write(Cursor::new(&mut bytes))?;
        Ok(bytes)
    }

    fn write<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut writer = WavWriter::new(writer, self.spec)?;

        match &self.pcm {
            Pcm::I8(samples) => {
                for &sample in samples {
                    writer.write_sample(sample)?;
                }
            }
            Pcm::I16(samples) => {
                for &sample in samples {
                    writer.write_sample(sample)?;
                }
            }
        }

        writer.finalize()?;
        Ok(())
    }
}

impl Slots for Wav {
    fn len(&self) -> usize {
        match &self.pcm {
            Pcm::I8(samples) => samples.len(),
            Pcm::I16(samples) => samples.len(),
        }
    }

    fn width(&self) -> u8 {
        match self.pcm {
            Pcm::I8(_) => 8,
            Pcm::I16(_) => 16,
        }
    }

    fn get(&self, index: usize) -> u16 {
        match &self.pcm {
            Pcm::I8(samples) => Slots::get(samples.as_slice(), index),
            Pcm::I16(samples) => Slots::get(samples.as_slice(), index),
        }
    }
}

impl SlotsMut for Wav {
    fn set(&mut self, index: usize, value: u16) {
        match &mut self.pcm {
            Pcm::I8(samples) => SlotsMut::set(samples.as_mut_slice(), index, value),
            Pcm::I16(samples) => SlotsMut::set(samples.as_mut_slice(), index, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitDepth, Carrier, Conceal, Package, Reveal};

    fn sine(len: usize) -> Vec<i16> {
        (0..len)
            .map(|i| {
                let t = i as f64 / 44_100.0;
                (f64::sin(2.0 * std::f64::consts::PI * 440.0 * t) * 16_000.0) as i16
            })
            .collect()
    }

    #[test]
    fn test_wav_bytes_roundtrip() {
        let mut wav = Wav::mono16(sine(10_000), 44_100);
        let depth = BitDepth::new(2).unwrap();

        Carrier::text(depth)
            .conceal(b"Hello, audio steganography!", &mut wav)
            .unwrap();

        let bytes = wav.to_wav_bytes().unwrap();
        let loaded = Wav::from_bytes(&bytes).unwrap();

        assert_eq!(loaded, wav);
        assert_eq!(loaded.samples16().map(<[i16]>::len), Some(10_000));
        assert_eq!(
            Package::text(depth).reveal(&loaded).unwrap(),
            b"Hello, audio steganography!"
        );
    }

    #[test]
    fn test_eight_bit_pcm() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8_000,
            bits_per_sample: 8,
            sample_format: SampleFormat::Int,
        };
        let wav = Wav {
            spec,
            pcm: Pcm::I8((0..200).map(|i| (i % 100) as i8 - 50).collect()),
        };

        let loaded = Wav::from_bytes(&wav.to_wav_bytes().unwrap()).unwrap();

        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.len(), 200);
        assert_eq!(loaded, wav);
        assert_eq!(loaded.duration_secs(), 100.0 / 8_000.0);
    }

    #[test]
    fn test_rejects_float_pcm() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8_000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let mut bytes = Vec::new();
        {
            let mut writer = WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
            writer.write_sample(0.5f32).unwrap();
            writer.finalize().unwrap();
        }

        assert!(matches!(
            Wav::from_bytes(&bytes),
            Err(Error::UnsupportedMedium(_))
        ));
    }
}
