/// Hover description box: one row per label, filled in on every mouse move.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointDescription {
    labels: Vec<String>,
    values: Vec<String>,
    visible: bool,
    position: (f64, f64),
}

impl PointDescription {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            ..Default::default()
        }
    }

    /// Shows `values` at canvas point `(x, y)`; missing values render empty.
    pub fn update(&mut self, x: f64, y: f64, values: Vec<String>) {
        self.values = values;
        self.values.resize(self.labels.len(), String::new());
        self.position = (x, y);
        self.visible = true;
    }

    pub fn show(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        let index = self.labels.iter().position(|l| l == label)?;
        self.values.get(index).map(String::as_str)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .zip(self.values.iter())
            .map(|(l, v)| (l.as_str(), v.as_str()))
    }
}
