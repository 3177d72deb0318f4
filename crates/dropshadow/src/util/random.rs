//! Seedable pseudo-random number generator (xorshift64).
//!
//! Deterministic and instance-based: demo setup code owns an `Rng` and
//! passes it where scattered placement or colours are needed. There is
//! no process-wide generator.

use glam::Vec2;

use crate::error::{Result, ShadowError};
use crate::util::color::{hex_rgb, Color};
use crate::util::math::fnv1a;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from a string via its FNV-1a hash.
    pub fn from_str_seed(seed: &str) -> Self {
        Self::new(fnv1a(seed) as u64)
    }

    /// Restart the sequence from a new seed.
    pub fn reseed(&mut self, seed: u64) -> &mut Self {
        *self = Self::new(seed);
        self
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max).
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform integer in [min, max). Returns `min` when the range is empty.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64) as u64;
        (min as i64 + (self.next_u64() % span) as i64) as i32
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// `count` points inside a `width` x `height` area, keeping `margin` clear of the edges.
    pub fn points(&mut self, width: f32, height: f32, count: usize, margin: f32) -> Vec<Vec2> {
        (0..count)
            .map(|_| {
                Vec2::new(
                    self.range_f32(margin, width - margin),
                    self.range_f32(margin, height - margin),
                )
            })
            .collect()
    }

    /// A point uniformly distributed over the annulus between `inner` and `outer`
    /// around `center`.
    pub fn point_in_radius(&mut self, center: Vec2, outer: f32, inner: f32) -> Result<Vec2> {
        if inner < 0.0 || outer < inner {
            return Err(ShadowError::InvalidArgument(format!(
                "radius range inner={} outer={}",
                inner, outer
            )));
        }
        let angle = self.next_f32() * std::f32::consts::TAU;
        let inner_sq = inner * inner;
        let radius = (self.next_f32() * (outer * outer - inner_sq) + inner_sq).sqrt();
        Ok(center + Vec2::from_angle(angle) * radius)
    }

    /// A point inside the box with top-left corner `origin`.
    pub fn point_in_box(&mut self, origin: Vec2, size: Vec2) -> Vec2 {
        Vec2::new(
            self.range_f32(origin.x, origin.x + size.x),
            self.range_f32(origin.y, origin.y + size.y),
        )
    }

    pub fn bool(&mut self) -> bool {
        self.next_f32() < 0.5
    }

    /// A random element, or `None` for an empty slice.
    pub fn element<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_int(items.len() as u32) as usize)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }

    pub fn color_float(&mut self, random_alpha: bool) -> Color {
        let r = self.next_f32();
        let g = self.next_f32();
        let b = self.next_f32();
        let a = if random_alpha { self.next_f32() } else { 1.0 };
        Color::rgba(r, g, b, a)
    }

    /// Channels as bytes in 0..=255.
    pub fn color_byte(&mut self, random_alpha: bool) -> [u8; 4] {
        let r = self.next_int(256) as u8;
        let g = self.next_int(256) as u8;
        let b = self.next_int(256) as u8;
        let a = if random_alpha { self.next_int(256) as u8 } else { 255 };
        [r, g, b, a]
    }

    /// `#rrggbbaa`.
    pub fn color_hex(&mut self, random_alpha: bool) -> String {
        let [r, g, b, a] = self.color_byte(random_alpha);
        format!("{}{:02x}", hex_rgb(r, g, b), a)
    }

    /// Alphanumeric string of `len` characters.
    pub fn string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ALPHANUMERIC[self.next_int(ALPHANUMERIC.len() as u32) as usize] as char)
            .collect()
    }

    pub fn flip(&mut self) -> &'static str {
        if self.bool() { "heads" } else { "tails" }
    }

    /// Roll a die with `sides` faces, in 1..=sides.
    pub fn roll(&mut self, sides: u32) -> u32 {
        1 + self.next_int(sides.max(1))
    }

    pub fn d2(&mut self) -> u32 { self.roll(2) }
    pub fn d4(&mut self) -> u32 { self.roll(4) }
    pub fn d6(&mut self) -> u32 { self.roll(6) }
    pub fn d8(&mut self) -> u32 { self.roll(8) }
    pub fn d10(&mut self) -> u32 { self.roll(10) }
    pub fn d12(&mut self) -> u32 { self.roll(12) }
    pub fn d20(&mut self) -> u32 { self.roll(20) }
    pub fn d100(&mut self) -> u32 { self.roll(100) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::from_str_seed("treetops");
        let mut rng2 = Rng::from_str_seed("treetops");
        for _ in 0..10 {
            assert_eq!(rng1.next_int(1000), rng2.next_int(1000));
        }
    }

    #[test]
    fn reseed_restarts_sequence() {
        let mut rng = Rng::new(1234);
        let first: Vec<u32> = (0..5).map(|_| rng.next_int(100)).collect();
        rng.reseed(1234);
        let again: Vec<u32> = (0..5).map(|_| rng.next_int(100)).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        // Should not panic or loop forever
        let _ = rng.next_int(100);
    }

    #[test]
    fn floats_stay_in_range() {
        let mut rng = Rng::new(7);
        for _ in 0..1000 {
            let f = rng.next_f32();
            assert!((0.0..1.0).contains(&f), "got {}", f);
            let r = rng.range_f32(-3.0, 3.0);
            assert!((-3.0..3.0).contains(&r), "got {}", r);
            let i = rng.range_i32(-2, 2);
            assert!((-2..2).contains(&i), "got {}", i);
        }
    }

    #[test]
    fn point_in_radius_lands_in_annulus() {
        let mut rng = Rng::new(42);
        let center = Vec2::new(100.0, -50.0);
        for _ in 0..200 {
            let p = rng.point_in_radius(center, 30.0, 10.0).unwrap();
            let d = p.distance(center);
            assert!(d >= 10.0 - 1e-3 && d <= 30.0 + 1e-3, "distance {}", d);
        }
    }

    #[test]
    fn point_in_radius_rejects_bad_ranges() {
        let mut rng = Rng::new(42);
        assert!(matches!(
            rng.point_in_radius(Vec2::ZERO, 10.0, -1.0),
            Err(ShadowError::InvalidArgument(_))
        ));
        assert!(matches!(
            rng.point_in_radius(Vec2::ZERO, 5.0, 10.0),
            Err(ShadowError::InvalidArgument(_))
        ));
    }

    #[test]
    fn points_respect_margin() {
        let mut rng = Rng::new(9);
        for p in rng.points(200.0, 100.0, 50, 20.0) {
            assert!(p.x >= 20.0 && p.x < 180.0);
            assert!(p.y >= 20.0 && p.y < 80.0);
        }
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = Rng::new(3);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn dice_and_strings() {
        let mut rng = Rng::new(11);
        for _ in 0..100 {
            let roll = rng.d6();
            assert!((1..=6).contains(&roll));
        }
        let s = rng.string(12);
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(rng.color_hex(false).len(), 9);
        assert!(rng.element::<u8>(&[]).is_none());
    }
}
