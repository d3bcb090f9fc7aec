//! Greedy single-link color clustering
//!
//! Samples are clustered in frequency order: each color joins the first
//! existing group whose *first-inserted* member is within the distance
//! threshold, otherwise it starts a new group. Per-member density scores
//! then rank the members of each group, and marginal groups (at or below
//! 1% of total samples) are dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{circular_mean_hue, Hsl, Rgb};

/// Groups whose total count is at or below this fraction of all samples
/// are dropped as noise.
const MIN_GROUP_FRACTION: f64 = 0.01;

/// A single observed color and its sample frequency within a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInstance {
    /// The observed color (serializes as lowercase `#rrggbb`).
    pub color: Rgb,
    /// Number of samples that hit this exact color.
    pub count: u32,
    /// `count / group total * 100`.
    pub percentage: f32,
    /// Density score: the sum over the group's members of
    /// `count(j) / (1 + dist(self, j))`. A color with many nearby,
    /// frequent neighbors scores higher than an outlier.
    pub score: f32,
}

impl ColorInstance {
    /// Canonical hex form of the observed color.
    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

/// A cluster of visually similar colors treated as one recolorable unit.
///
/// Members are ordered by score descending; `members[0]` is the default
/// representative. The id is stable once assigned -- editing operations
/// ([`Extraction::merge_groups`], [`Extraction::move_member`],
/// [`Extraction::split_group`]) mutate membership but never reassign
/// surviving ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGroup {
    /// Stable group identity.
    pub id: u32,
    /// Member colors, ordered by score descending.
    pub members: Vec<ColorInstance>,
    /// Sum of all member counts. Invariant: always equals
    /// `members.iter().map(|m| m.count).sum()`.
    pub total_count: u64,
    /// Caller-chosen representative override. `None` means the top-scoring
    /// member is the representative.
    pub representative_override: Option<Rgb>,
    /// Circular-mean hue of the members, weighted by count. Anchor for
    /// tint application.
    pub base_hue: f32,
}

impl ColorGroup {
    /// The group's representative color: the override if set, else the
    /// top-scoring member.
    pub fn representative(&self) -> Rgb {
        self.representative_override
            .unwrap_or_else(|| self.members[0].color)
    }

    /// Recompute percentages, scores, member order and base hue from the
    /// current membership. Called after any membership change.
    fn rebuild_stats(&mut self) {
        self.total_count = self.members.iter().map(|m| m.count as u64).sum();
        let total = self.total_count.max(1) as f32;

        for i in 0..self.members.len() {
            let mut score = 0.0f32;
            let color = self.members[i].color;
            for other in &self.members {
                score += other.count as f32 / (1.0 + color.distance(other.color));
            }
            self.members[i].score = score;
            self.members[i].percentage = self.members[i].count as f32 / total * 100.0;
        }

        // Stable sort keeps equal-score members in frequency order.
        self.members.sort_by(|a, b| b.score.total_cmp(&a.score));

        let hues: Vec<(f32, f32)> = self
            .members
            .iter()
            .map(|m| (Hsl::from(m.color).h, m.count as f32))
            .collect();
        self.base_hue = circular_mean_hue(&hues);
    }
}

/// The result of a sampling pass: ordered groups plus the total number of
/// samples taken. Zero samples yields zero groups, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Extraction {
    /// Groups ordered by total count descending.
    pub groups: Vec<ColorGroup>,
    /// Total number of samples taken from the source.
    pub total_samples: u64,
}

/// Error type for group editing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupEditError {
    /// No group with the given id exists.
    #[error("no group with id {0}")]
    UnknownGroup(u32),
    /// The named color is not a member of the source group.
    #[error("color {0} is not a member of group {1}")]
    UnknownMember(Rgb, u32),
}

impl Extraction {
    fn group_index(&self, id: u32) -> Result<usize, GroupEditError> {
        self.groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(GroupEditError::UnknownGroup(id))
    }

    /// Merge all members of `source` into `target`, removing `source`.
    ///
    /// The target keeps its id; its stats are recomputed. Other groups are
    /// untouched.
    pub fn merge_groups(&mut self, target: u32, source: u32) -> Result<(), GroupEditError> {
        if target == source {
            return Ok(());
        }
        let src_idx = self.group_index(source)?;
        self.group_index(target)?;
        let src = self.groups.remove(src_idx);
        let dst_idx = self.group_index(target).expect("target still present");
        self.groups[dst_idx].members.extend(src.members);
        self.groups[dst_idx].rebuild_stats();
        Ok(())
    }

    /// Move a single member color from one group to another.
    ///
    /// Both groups have their stats recomputed. A source group left empty
    /// by the move is removed.
    pub fn move_member(&mut self, from: u32, to: u32, color: Rgb) -> Result<(), GroupEditError> {
        if from == to {
            return Ok(());
        }
        let from_idx = self.group_index(from)?;
        self.group_index(to)?;

        let member_idx = self.groups[from_idx]
            .members
            .iter()
            .position(|m| m.color == color)
            .ok_or(GroupEditError::UnknownMember(color, from))?;
        let member = self.groups[from_idx].members.remove(member_idx);

        if self.groups[from_idx].members.is_empty() {
            self.groups.remove(from_idx);
        } else {
            self.groups[from_idx].rebuild_stats();
        }

        let to_idx = self.group_index(to).expect("target still present");
        self.groups[to_idx].members.push(member);
        self.groups[to_idx].rebuild_stats();
        Ok(())
    }

    /// Split the named member colors out of `from` into a new group.
    ///
    /// Returns the new group's id (one past the current maximum). Colors
    /// not present in the source group are an error and nothing moves. A
    /// split that would empty the source removes it.
    pub fn split_group(&mut self, from: u32, colors: &[Rgb]) -> Result<u32, GroupEditError> {
        let from_idx = self.group_index(from)?;
        for &color in colors {
            if !self.groups[from_idx].members.iter().any(|m| m.color == color) {
                return Err(GroupEditError::UnknownMember(color, from));
            }
        }

        let new_id = self.groups.iter().map(|g| g.id + 1).max().unwrap_or(0);
        let (moved, kept): (Vec<ColorInstance>, Vec<ColorInstance>) = self.groups[from_idx]
            .members
            .drain(..)
            .partition(|m| colors.contains(&m.color));
        self.groups[from_idx].members = kept;

        if self.groups[from_idx].members.is_empty() {
            self.groups.remove(from_idx);
        } else {
            self.groups[from_idx].rebuild_stats();
        }

        if !moved.is_empty() {
            let mut group = ColorGroup {
                id: new_id,
                members: moved,
                total_count: 0,
                representative_override: None,
                base_hue: 0.0,
            };
            group.rebuild_stats();
            self.groups.push(group);
        }
        Ok(new_id)
    }
}

/// Cluster a frequency table of sampled colors into groups.
///
/// `freq` does not need to be ordered; it is sorted by count descending
/// (hex ascending on ties) before clustering, which is what makes the
/// grouping deterministic for a given sample set.
pub(crate) fn cluster_samples(mut freq: Vec<(Rgb, u32)>, distance_threshold: f32) -> Extraction {
    let total_samples: u64 = freq.iter().map(|&(_, c)| c as u64).sum();
    if total_samples == 0 {
        return Extraction::default();
    }

    freq.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    // Greedy single-link: anchors[i] is the first-inserted member of
    // group i, and the only color new candidates are compared against.
    let mut anchors: Vec<Rgb> = Vec::new();
    let mut buckets: Vec<Vec<(Rgb, u32)>> = Vec::new();

    for &(color, count) in &freq {
        match anchors
            .iter()
            .position(|&a| a.distance(color) <= distance_threshold)
        {
            Some(i) => buckets[i].push((color, count)),
            None => {
                anchors.push(color);
                buckets.push(vec![(color, count)]);
            }
        }
    }

    let mut groups: Vec<ColorGroup> = buckets
        .into_iter()
        .map(|members| {
            let mut group = ColorGroup {
                id: 0,
                members: members
                    .into_iter()
                    .map(|(color, count)| ColorInstance {
                        color,
                        count,
                        percentage: 0.0,
                        score: 0.0,
                    })
                    .collect(),
                total_count: 0,
                representative_override: None,
                base_hue: 0.0,
            };
            group.rebuild_stats();
            group
        })
        .filter(|g| g.total_count as f64 > total_samples as f64 * MIN_GROUP_FRACTION)
        .collect();

    groups.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    for (i, group) in groups.iter_mut().enumerate() {
        group.id = i as u32;
    }

    tracing::debug!(
        groups = groups.len(),
        samples = total_samples,
        "clustered color samples"
    );

    Extraction {
        groups,
        total_samples,
    }
}
