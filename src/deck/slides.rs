use crate::report::charts::ChartKind;

#[derive(Clone, Debug, PartialEq)]
pub struct Slide {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub chart: ChartKind,
}

impl Slide {
    pub fn new(id: &str, title: &str, caption: &str, chart: ChartKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            caption: caption.to_string(),
            chart,
        }
    }
}

/// The narrative, in presentation order.
pub fn housing_story() -> Vec<Slide> {
    vec![
        Slide::new(
            "scene1",
            "Boroughs of New York Metropolitan Area",
            "A visualization of the average price of listings in each borough of New York City.",
            ChartKind::BoroughPrice,
        ),
        Slide::new(
            "scene2",
            "What Kind of Home?",
            "Average asking price by property type across the whole metropolitan area.",
            ChartKind::PropertyTypePrice,
        ),
        Slide::new(
            "scene3",
            "Price and Size",
            "Every listing by square footage and price. Pick a borough to focus on its listings.",
            ChartKind::PriceVsSqft,
        ),
        Slide::new(
            "scene4",
            "Inside a Borough",
            "Average price by property type within the selected borough.",
            ChartKind::BoroughPropertyTypes,
        ),
    ]
}
