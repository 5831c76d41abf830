use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shape summary of an uploaded CSV, built once per request and
/// discarded after the prompt is generated.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummary {
    pub columns: Vec<String>,
    pub sample_rows: Vec<Value>,
    pub num_rows: usize,
    pub num_columns: usize,
}

/// The ten chart types the LLM is allowed to suggest. Anything else
/// fails deserialization and is treated as a malformed upstream reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
    Treemap,
    Heatmap,
    Histogram,
    BoxPlot,
    Bubble,
    Area,
}

impl ChartType {
    pub const ALL: [ChartType; 10] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::Treemap,
        ChartType::Heatmap,
        ChartType::Histogram,
        ChartType::BoxPlot,
        ChartType::Bubble,
        ChartType::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Line => "Line",
            ChartType::Pie => "Pie",
            ChartType::Scatter => "Scatter",
            ChartType::Treemap => "Treemap",
            ChartType::Heatmap => "Heatmap",
            ChartType::Histogram => "Histogram",
            ChartType::BoxPlot => "BoxPlot",
            ChartType::Bubble => "Bubble",
            ChartType::Area => "Area",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightSuggestion {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub description: String,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_type_serde_names_match_wire_strings() {
        for chart_type in ChartType::ALL {
            let json = serde_json::to_string(&chart_type).unwrap();
            assert_eq!(json, format!("\"{}\"", chart_type.as_str()));
        }
    }

    #[test]
    fn suggestion_deserializes_from_llm_shape() {
        let raw = r#"{
            "title": "Top Countries by Revenue",
            "type": "Bar",
            "description": "Ranks countries by total revenue.",
            "prompt": "Show top revenue-generating countries"
        }"#;
        let suggestion: InsightSuggestion = serde_json::from_str(raw).unwrap();
        assert_eq!(suggestion.chart_type, ChartType::Bar);
        assert_eq!(suggestion.title, "Top Countries by Revenue");
    }

    #[test]
    fn unknown_chart_type_is_rejected() {
        let raw = r#"{
            "title": "Something",
            "type": "Donut",
            "description": "Not a permitted type.",
            "prompt": "Show a donut chart"
        }"#;
        assert!(serde_json::from_str::<InsightSuggestion>(raw).is_err());
    }
}
