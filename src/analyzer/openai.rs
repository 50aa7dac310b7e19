use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::aggregate::{top_companies, top_skills};
use crate::analyzer::{LiveSettings, MarketAnalyzer};
use crate::error::AppError;
use crate::models::analysis::MarketAnalysis;
use crate::models::job::Job;

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.7;

/// Chat-completions client that asks the model for a JSON market analysis.
pub struct OpenAiAnalyzer {
    client: reqwest::Client,
    settings: LiveSettings,
}

/// Fields the model is asked to return.
#[derive(Debug, Deserialize)]
struct InsightsReply {
    trend_analysis: String,
    hot_skills: Vec<String>,
    salary_insights: String,
    growth_prediction: String,
    recommendations: Vec<String>,
}

impl OpenAiAnalyzer {
    pub fn new(settings: LiveSettings) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::Analyzer(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl MarketAnalyzer for OpenAiAnalyzer {
    fn name(&self) -> &str {
        "openai"
    }

    async fn analyze(&self, jobs: &[Job]) -> Result<MarketAnalysis, AppError> {
        let body = json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": build_prompt(jobs) }],
            "max_tokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        });

        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Analyzer(format!("Request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::Analyzer(format!(
                "Analysis endpoint returned {}",
                resp.status()
            )));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Analyzer(format!("Failed to parse response: {e}")))?;

        let content = data
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::Analyzer("Missing message content in response".to_string()))?;

        parse_reply(content, self.name())
    }
}

/// Summarise the collection for the model: size, leading companies and the
/// most demanded skills.
fn build_prompt(jobs: &[Job]) -> String {
    let summary = if jobs.is_empty() {
        "No job data available".to_string()
    } else {
        let skills: Vec<String> = top_skills(jobs, 10)
            .into_iter()
            .map(|(skill, count)| format!("{skill}: {count}"))
            .collect();
        format!(
            "Total Jobs: {}\nTop Companies: {}\nMost Demanded Skills: {}",
            jobs.len(),
            top_companies(jobs, 10).join(", "),
            skills.join(", ")
        )
    };

    format!(
        "As a career market analyst, analyze this job market data and provide insights:\n\n\
         {summary}\n\n\
         Respond with a JSON object only, with keys:\n\
         \"trend_analysis\": overall market trend in one sentence,\n\
         \"hot_skills\": the top 5 in-demand skills as a list,\n\
         \"salary_insights\": key salary observations,\n\
         \"growth_prediction\": market growth forecast,\n\
         \"recommendations\": 3 actionable career tips as a list."
    )
}

fn parse_reply(content: &str, source: &str) -> Result<MarketAnalysis, AppError> {
    // Models sometimes wrap JSON in a fenced code block.
    let trimmed = content
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    let reply: InsightsReply = serde_json::from_str(trimmed)
        .map_err(|e| AppError::Analyzer(format!("Reply is not the expected JSON: {e}")))?;

    if reply.recommendations.is_empty() {
        return Err(AppError::Analyzer("Reply has no recommendations".to_string()));
    }

    Ok(MarketAnalysis {
        trend_analysis: reply.trend_analysis,
        hot_skills: reply.hot_skills,
        salary_insights: reply.salary_insights,
        growth_prediction: reply.growth_prediction,
        recommendations: reply.recommendations,
        generated_at: Utc::now(),
        source: source.to_string(),
    })
}
