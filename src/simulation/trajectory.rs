use crate::tumor::S;
use std::slice::Iter;

/// One recorded point of a run: the state at `time`, before stepping.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<St> {
  pub time: S,
  pub state: St,
  pub burden: S,
}

impl<St> Sample<St>
where
  for<'a> &'a St: IntoIterator<Item = &'a S>,
{
  pub fn is_finite(&self) -> bool {
    self.time.is_finite()
      && self.burden.is_finite()
      && (&self.state).into_iter().all(|value| value.is_finite())
  }
}

/// Samples of one run in time order. Only the driver appends.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<St> {
  samples: Vec<Sample<St>>,
}

impl<St> Trajectory<St> {
  pub(crate) fn with_capacity(capacity: usize) -> Self {
    Self {
      samples: Vec::with_capacity(capacity),
    }
  }

  pub(crate) fn push(&mut self, sample: Sample<St>) {
    self.samples.push(sample);
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  pub fn samples(&self) -> &[Sample<St>] {
    &self.samples
  }

  pub fn first(&self) -> Option<&Sample<St>> {
    self.samples.first()
  }

  pub fn last(&self) -> Option<&Sample<St>> {
    self.samples.last()
  }

  pub fn iter(&self) -> Iter<'_, Sample<St>> {
    self.samples.iter()
  }
}

impl<St> Trajectory<St>
where
  for<'a> &'a St: IntoIterator<Item = &'a S>,
{
  /// Split into parallel columns, one per entry of `names` (state order).
  pub fn series(&self, names: &[&'static str]) -> Series {
    let mut compartments: Vec<(&'static str, Vec<S>)> = names
      .iter()
      .map(|name| (*name, Vec::with_capacity(self.len())))
      .collect();

    for sample in &self.samples {
      for ((_, column), value) in compartments.iter_mut().zip(&sample.state) {
        column.push(*value);
      }
    }

    Series {
      time: self.samples.iter().map(|sample| sample.time).collect(),
      compartments,
      burden: self.samples.iter().map(|sample| sample.burden).collect(),
    }
  }
}

impl<'a, St> IntoIterator for &'a Trajectory<St> {
  type Item = &'a Sample<St>;
  type IntoIter = Iter<'a, Sample<St>>;

  fn into_iter(self) -> Self::IntoIter {
    self.samples.iter()
  }
}

/// A trajectory as equal-length columns, ready to plot.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
  pub time: Vec<S>,
  pub compartments: Vec<(&'static str, Vec<S>)>,
  pub burden: Vec<S>,
}

impl Series {
  pub fn len(&self) -> usize {
    self.time.len()
  }

  pub fn is_empty(&self) -> bool {
    self.time.is_empty()
  }

  pub fn names(&self) -> Vec<&'static str> {
    self.compartments.iter().map(|(name, _)| *name).collect()
  }

  pub fn column(&self, name: &str) -> Option<&[S]> {
    self
      .compartments
      .iter()
      .find(|(column_name, _)| *column_name == name)
      .map(|(_, column)| column.as_slice())
  }
}

#[test]
fn series_splits_columns() {
  use nalgebra::Vector2;

  let mut trajectory = Trajectory::with_capacity(2);
  trajectory.push(Sample {
    time: 0.0,
    state: Vector2::new(1.0, 2.0),
    burden: 1.0,
  });
  trajectory.push(Sample {
    time: 0.5,
    state: Vector2::new(3.0, 4.0),
    burden: 3.0,
  });

  let series = trajectory.series(&["S", "D"]);

  assert_eq!(series.len(), 2);
  assert_eq!(series.time, vec![0.0, 0.5]);
  assert_eq!(series.column("S"), Some(&[1.0, 3.0][..]));
  assert_eq!(series.column("D"), Some(&[2.0, 4.0][..]));
  assert_eq!(series.column("S2"), None);
  assert_eq!(series.burden, vec![1.0, 3.0]);
  assert_eq!(series.names(), vec!["S", "D"]);
}

#[test]
fn non_finite_samples_are_flagged() {
  use nalgebra::Vector2;

  let sample = Sample {
    time: 1.0,
    state: Vector2::new(S::NAN, 0.0),
    burden: 0.0,
  };

  assert!(!sample.is_finite());
}
