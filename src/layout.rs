//! Space distribution: arranging a container's children along one axis.
//!
//! [`solve`] is a pure function from a container box and per-child
//! constraints to per-child rects. It holds no state; callers re-invoke it
//! whenever the container resizes, a child's preferred size or expand flags
//! change, a child is added or removed, or spacing/margins/alignment change.

use crate::geom::{Expanse, Rect};

/// The main axis a container distributes space along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Children are arranged left to right.
    Horizontal,
    /// Children are arranged top to bottom.
    Vertical,
}

/// Cross-axis placement for children that do not stretch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush with the container's leading edge.
    #[default]
    Start,
    /// Centered in the container's cross extent.
    Center,
    /// Flush with the container's trailing edge.
    End,
}

/// Space reserved inside the container's edges before distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    /// Left margin.
    pub left: i32,
    /// Right margin.
    pub right: i32,
    /// Top margin.
    pub top: i32,
    /// Bottom margin.
    pub bottom: i32,
}

impl Margins {
    /// The same margin on all four sides.
    pub fn uniform(m: i32) -> Self {
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }
}

/// A container's layout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    /// The axis children are arranged along.
    pub axis: Axis,
    /// Gap between adjacent children.
    pub spacing: i32,
    /// Space reserved inside the container's edges.
    pub margins: Margins,
    /// Cross-axis placement for non-stretching children.
    pub align: Align,
}

impl LayoutSpec {
    /// A left-to-right row with no spacing or margins.
    pub fn row() -> Self {
        Self {
            axis: Axis::Horizontal,
            spacing: 0,
            margins: Margins::default(),
            align: Align::Start,
        }
    }

    /// A top-to-bottom column with no spacing or margins.
    pub fn column() -> Self {
        Self {
            axis: Axis::Vertical,
            spacing: 0,
            margins: Margins::default(),
            align: Align::Start,
        }
    }

    /// Set the gap between adjacent children.
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the cross-axis alignment.
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Per-child input to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildConstraint {
    /// The size the child would choose for itself.
    pub preferred: Expanse,
    /// Absorb surplus horizontal space.
    pub expand_x: bool,
    /// Absorb surplus vertical space.
    pub expand_y: bool,
}

/// Distribute a container's content box among its children.
///
/// Returns one rect per child, positioned relative to the container's
/// origin. Sizes are never negative; a container smaller than its margins or
/// its children's minimums clamps rather than failing.
pub fn solve(container: Expanse, children: &[ChildConstraint], spec: &LayoutSpec) -> Vec<Rect> {
    if children.is_empty() {
        return Vec::new();
    }

    let inner_x = spec.margins.left;
    let inner_y = spec.margins.top;
    let inner_w = (container.w - spec.margins.left - spec.margins.right).max(0);
    let inner_h = (container.h - spec.margins.top - spec.margins.bottom).max(0);

    let (avail_main, avail_cross) = match spec.axis {
        Axis::Horizontal => (inner_w, inner_h),
        Axis::Vertical => (inner_h, inner_w),
    };

    let prefs: Vec<i32> = children
        .iter()
        .map(|c| match spec.axis {
            Axis::Horizontal => c.preferred.w,
            Axis::Vertical => c.preferred.h,
        })
        .collect();
    let expands: Vec<bool> = children
        .iter()
        .map(|c| match spec.axis {
            Axis::Horizontal => c.expand_x,
            Axis::Vertical => c.expand_y,
        })
        .collect();

    let n = children.len() as i32;
    let natural: i32 = prefs.iter().sum::<i32>() + (n - 1) * spec.spacing;
    let mut sizes = prefs.clone();

    if natural <= avail_main {
        distribute_surplus(&mut sizes, &expands, avail_main - natural);
    } else {
        let mut deficit = natural - avail_main;
        // Non-expandable children give up space first, proportionally to
        // their preferred size; expandables only shrink once the
        // non-expandables are exhausted.
        deficit -= shrink_group(&mut sizes, &prefs, &expands, false, deficit);
        if deficit > 0 {
            shrink_group(&mut sizes, &prefs, &expands, true, deficit);
        }
    }

    let mut out = Vec::with_capacity(children.len());
    let mut main_pos = 0;
    for (i, child) in children.iter().enumerate() {
        let main_size = sizes[i].max(0);

        let (pref_cross, expand_cross) = match spec.axis {
            Axis::Horizontal => (child.preferred.h, child.expand_y),
            Axis::Vertical => (child.preferred.w, child.expand_x),
        };
        let cross_size = if expand_cross {
            avail_cross
        } else {
            pref_cross.clamp(0, avail_cross)
        };
        let cross_pos = match spec.align {
            Align::Start => 0,
            Align::Center => (avail_cross - cross_size) / 2,
            Align::End => avail_cross - cross_size,
        };

        out.push(match spec.axis {
            Axis::Horizontal => Rect::new(
                inner_x + main_pos,
                inner_y + cross_pos,
                main_size,
                cross_size,
            ),
            Axis::Vertical => Rect::new(
                inner_x + cross_pos,
                inner_y + main_pos,
                cross_size,
                main_size,
            ),
        });

        main_pos += main_size + spec.spacing;
    }
    out
}

/// Divide surplus equally among expandable children. The integer remainder
/// goes to the last expandable child so the assigned total matches the
/// available extent exactly.
fn distribute_surplus(sizes: &mut [i32], expands: &[bool], surplus: i32) {
    let idxs: Vec<usize> = (0..sizes.len()).filter(|i| expands[*i]).collect();
    let Some(last) = idxs.last().copied() else {
        return;
    };
    let k = idxs.len() as i32;
    let per = surplus / k;
    for i in &idxs {
        sizes[*i] += per;
    }
    sizes[last] += surplus - per * k;
}

/// Shrink one expand-class of children proportionally to their preferred
/// sizes, clamping at zero. Returns the amount actually reclaimed.
fn shrink_group(
    sizes: &mut [i32],
    prefs: &[i32],
    expands: &[bool],
    expandable: bool,
    deficit: i32,
) -> i32 {
    let idxs: Vec<usize> = (0..sizes.len()).filter(|i| expands[*i] == expandable).collect();
    let total: i32 = idxs.iter().map(|i| prefs[*i]).sum();
    if total <= 0 {
        return 0;
    }
    let take = deficit.min(total);
    let mut taken = 0i32;
    for (pos, i) in idxs.iter().enumerate() {
        // Round down per child; the last child in the group absorbs the
        // remainder so the group total is exact.
        let cut = if pos + 1 == idxs.len() {
            take - taken
        } else {
            (take as i64 * prefs[*i] as i64 / total as i64) as i32
        };
        sizes[*i] = (sizes[*i] - cut).max(0);
        taken += cut;
    }
    take
}
