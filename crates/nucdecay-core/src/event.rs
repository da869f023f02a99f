//! Generated decay event and its text serialization.
//!
//! An [`Event`] is a reusable buffer: the generator fills it, the caller
//! consumes it and calls [`Event::reset`] before the next `shoot`, so the
//! particle vector keeps its allocation across many cycles.
//!
//! Text layout written by [`Event::store`] (time in seconds, momentum in MeV/c):
//!
//! ```text
//! [event-time]                       only with StoreFlags::EVENT_TIME
//! number-of-particles
//! code time px py pz [name]          one line per particle, name only with
//!                                    StoreFlags::PARTICLE_NAME
//! ```

use std::io::{BufRead, Write};
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::particle::{Particle, ParticleCode};

/// Bit set selecting the optional fields written by [`Event::store`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct StoreFlags(pub u32);

impl StoreFlags {
    pub const NONE: Self = Self(0);
    /// Write the event-level decay time before the particle count.
    pub const EVENT_TIME: Self = Self(0x1);
    /// Append the particle name to each particle line.
    pub const PARTICLE_NAME: Self = Self(0x2);
    pub const ALL: Self = Self(0x3);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for StoreFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One generated decay: particles in emission order plus the decay time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Event {
    /// Event-level time of decay in seconds, independent of particle offsets.
    pub time: f64,
    pub particles: Vec<Particle>,
    /// Label of the generator that produced the event.
    pub generator: Option<String>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            particles: Vec::with_capacity(n),
            ..Self::default()
        }
    }

    /// Clear particles, time and label. Keeps the particle allocation.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.time = 0.0;
        self.generator = None;
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn set_generator(&mut self, label: &str) {
        self.generator = Some(label.to_string());
    }

    pub fn add_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Add `dt` seconds to every particle's emission offset.
    pub fn shift_particles_time(&mut self, dt: f64) {
        for p in &mut self.particles {
            p.time += dt;
        }
    }

    /// Append the particles of `other`, re-expressing their offsets
    /// relative to this event's time.
    pub fn merge(&mut self, other: &Event) {
        let dt = other.time - self.time;
        self.particles.extend(other.particles.iter().cloned().map(|mut p| {
            p.time += dt;
            p
        }));
    }

    /// Sum of the kinetic energies of all particles (MeV).
    pub fn total_kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }

    /// Sum of the kinetic energies of particles of one species (MeV).
    pub fn kinetic_energy_of(&self, code: ParticleCode) -> f64 {
        self.particles
            .iter()
            .filter(|p| p.code == code)
            .map(Particle::kinetic_energy)
            .sum()
    }

    /// Write the event in the text layout selected by `flags`.
    ///
    /// Names are written as a single token: whitespace inside a particle
    /// name becomes `_`, and an empty name falls back to the species name.
    pub fn store<W: Write>(&self, out: &mut W, flags: StoreFlags) -> std::io::Result<()> {
        if flags.contains(StoreFlags::EVENT_TIME) {
            writeln!(out, "{}", self.time)?;
        }
        writeln!(out, "{}", self.particles.len())?;
        for p in &self.particles {
            let [px, py, pz] = p.momentum;
            write!(out, "{} {} {} {} {}", p.code.code(), p.time, px, py, pz)?;
            if flags.contains(StoreFlags::PARTICLE_NAME) {
                let name = match p.name.as_deref() {
                    Some(name) if !name.trim().is_empty() => name
                        .chars()
                        .map(|c| if c.is_whitespace() { '_' } else { c })
                        .collect(),
                    _ => p.code.name().to_string(),
                };
                write!(out, " {name}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Read one event written by [`Event::store`] with the same `flags`,
    /// replacing the current contents. Blank lines are skipped.
    pub fn load<R: BufRead>(
        &mut self,
        input: &mut R,
        flags: StoreFlags,
    ) -> Result<(), FormatError> {
        self.reset();
        let mut reader = LineReader { input, line_no: 0 };

        if flags.contains(StoreFlags::EVENT_TIME) {
            let line = reader.next_line("event time")?;
            self.time = parse_field(line.trim(), "event time", reader.line_no)?;
        }

        let line = reader.next_line("particle count")?;
        let count: usize = parse_field(line.trim(), "particle count", reader.line_no)?;
        self.particles.reserve(count);

        for _ in 0..count {
            let line = reader.next_line("particle")?;
            let n = reader.line_no;
            let mut fields = line.split_whitespace();
            let mut next = |field: &'static str| {
                fields.next().ok_or(FormatError::InvalidField {
                    field,
                    line: n,
                    value: String::new(),
                })
            };

            let raw_code: u32 = parse_field(next("code")?, "code", n)?;
            let code = ParticleCode::from_code(raw_code)
                .ok_or(FormatError::UnknownParticle { code: raw_code, line: n })?;
            let time = parse_field(next("time")?, "time", n)?;
            let px = parse_field(next("px")?, "px", n)?;
            let py = parse_field(next("py")?, "py", n)?;
            let pz = parse_field(next("pz")?, "pz", n)?;
            let name = if flags.contains(StoreFlags::PARTICLE_NAME) {
                Some(next("name")?.to_string())
            } else {
                None
            };

            self.particles.push(Particle {
                code,
                time,
                momentum: [px, py, pz],
                name,
            });
        }
        Ok(())
    }

    /// Human-readable multi-line dump.
    pub fn print<W: Write>(&self, out: &mut W, title: &str, indent: &str) -> std::io::Result<()> {
        if !title.is_empty() {
            writeln!(out, "{indent}{title}")?;
        }
        if let Some(label) = &self.generator {
            writeln!(out, "{indent}|-- Generator : {label}")?;
        }
        writeln!(out, "{indent}|-- Time : {} s", self.time)?;
        writeln!(out, "{indent}`-- Particles : {}", self.particles.len())?;
        for (i, p) in self.particles.iter().enumerate() {
            let tag = if i + 1 == self.particles.len() { "`--" } else { "|--" };
            let [px, py, pz] = p.momentum;
            writeln!(
                out,
                "{indent}    {tag} {:<6} t={} s p=({px}, {py}, {pz}) MeV/c T={} MeV",
                p.code.name(),
                p.time,
                p.kinetic_energy()
            )?;
        }
        Ok(())
    }
}

struct LineReader<'a, R> {
    input: &'a mut R,
    line_no: usize,
}

impl<R: BufRead> LineReader<'_, R> {
    fn next_line(&mut self, what: &'static str) -> Result<String, FormatError> {
        loop {
            let mut buf = String::new();
            let n = self.input.read_line(&mut buf)?;
            if n == 0 {
                return Err(FormatError::UnexpectedEof(what));
            }
            self.line_no += 1;
            if !buf.trim().is_empty() {
                return Ok(buf);
            }
        }
    }
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    line: usize,
) -> Result<T, FormatError> {
    raw.parse().map_err(|_| FormatError::InvalidField {
        field,
        line,
        value: raw.to_string(),
    })
}
