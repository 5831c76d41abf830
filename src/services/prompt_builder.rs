use crate::models::{ChartType, CsvSummary};

/// Formats the dataset summary into the fixed instruction template sent
/// to the LLM. Pure function: identical summaries produce byte-identical
/// prompts.
pub fn build_insight_prompt(summary: &CsvSummary) -> String {
    let sample_rows = serde_json::to_string_pretty(&summary.sample_rows)
        .unwrap_or_else(|_| "[]".to_string());

    let chart_types = ChartType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a professional data visualization assistant integrated into an AI dashboard tool.

A CSV file has been uploaded containing **{num_rows} rows** and **{num_columns} columns**.
Here are the column names:
{columns}

Sample data (first 3 rows):
{sample_rows}

---

Your task:
Generate exactly **10 highly meaningful chart prompt suggestions** that would help users analyze and gain insights from this dataset.

Each chart must include:
- **title**: A clear, concise name of the chart
- **type**: The best-suited chart type ({chart_types})
- **description**: Why this chart matters, what question it answers or what insight it reveals
- **prompt**: A short natural-language command (what the user might type or click)

---

Think like a data analyst building a real dashboard:
- Identify trends, distributions, comparisons, correlations, or rankings
- Vary the chart types; avoid repetition
- Aim for business-useful or exploration-worthy charts

---

Respond ONLY with a **JSON array of 10 items** like:
[
  {{
    "title": "Top Countries by Revenue",
    "type": "Bar",
    "description": "Ranks countries by their total revenue to highlight top performers.",
    "prompt": "Show top revenue-generating countries"
  }},
  {{
    "title": "Salary Growth Over Experience",
    "type": "Line",
    "description": "Shows how salary increases with experience, indicating career progression.",
    "prompt": "Plot salary vs experience trend"
  }},
  ...
]
"#,
        num_rows = summary.num_rows,
        num_columns = summary.num_columns,
        columns = summary.columns.join(", "),
        sample_rows = sample_rows,
        chart_types = chart_types,
    )
}
