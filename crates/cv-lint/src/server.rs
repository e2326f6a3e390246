//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the CV checks over MCP so assistants can score a CV's text
//! without shelling out to the CLI. Each tool takes the extracted text
//! directly and returns the same JSON report the CLI prints with `--json`.
//!
//! The server is a presentation layer: every `#[tool]` method delegates to
//! `cv_lint_core` and only converts errors to `McpError`.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use cv_lint_core::{analysis, ats, keywords, markdown, readability, sections, text};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_cv` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeCvParams {
    /// Extracted CV text.
    pub text: String,
    /// Whether the text is markdown and should be converted first.
    #[serde(default)]
    pub markdown: bool,
}

/// Parameters for the `check_readability` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckReadabilityParams {
    /// Extracted CV text.
    pub text: String,
    /// Minimum acceptable reading-ease score.
    pub min_score: Option<f64>,
    /// Whether the text is markdown and should be converted first.
    #[serde(default)]
    pub markdown: bool,
}

/// Parameters for the `top_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct TopKeywordsParams {
    /// Extracted CV text.
    pub text: String,
    /// Maximum number of keywords to return (default 10).
    pub limit: Option<usize>,
}

/// Parameters for the `check_sections` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckSectionsParams {
    /// Extracted CV text.
    pub text: String,
    /// Sections to check (Experience, Education, Skills, Certifications,
    /// Languages). Omit for all.
    pub sections: Option<Vec<String>>,
}

/// Parameters for the `check_ats` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CheckAtsParams {
    /// Raw extracted CV text, layout whitespace intact.
    pub text: String,
    /// Minimum acceptable ATS score (0-100).
    pub min_score: Option<u32>,
}

/// MCP server exposing CV checks to AI assistants.
///
/// Each `#[tool]` method in the `#[tool_router]` impl block is automatically
/// registered and callable via the MCP protocol.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    max_input_bytes: Option<usize>,
    reject_empty_input: bool,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a new MCP server instance with the default input limit.
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
            max_input_bytes: Some(cv_lint_core::DEFAULT_MAX_INPUT_BYTES),
            reject_empty_input: false,
        }
    }

    /// Set the maximum accepted text size. `None` disables the check.
    pub const fn with_max_input_bytes(mut self, max: Option<usize>) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// Set whether `analyze_cv` refuses blank text.
    pub const fn with_reject_empty_input(mut self, reject: bool) -> Self {
        self.reject_empty_input = reject;
        self
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Run the full CV analysis.
    #[tool(
        description = "Analyze CV text. Returns word and sentence counts, readability, top keywords, per-section coverage sub-scores, and improvement suggestions."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_cv(
        &self,
        Parameters(params): Parameters<AnalyzeCvParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "analyze_cv", markdown = params.markdown, "executing MCP tool");

        let input = self.prepare(&params.text, params.markdown)?;
        let report = analysis::analyze_checked(&input, self.reject_empty_input)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let json = to_json(&report)?;

        tracing::info!(
            tool = "analyze_cv",
            word_count = report.word_count,
            readability = report.readability,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Score readability.
    #[tool(
        description = "Check readability of CV text. Returns a Flesch reading-ease score (higher is easier), its band, and counts."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_readability(
        &self,
        Parameters(params): Parameters<CheckReadabilityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "check_readability",
            markdown = params.markdown,
            "executing MCP tool"
        );

        let input = self.prepare(&params.text, params.markdown)?;
        let report = readability::check_readability(&input, params.min_score);
        let json = to_json(&report)?;

        tracing::info!(
            tool = "check_readability",
            score = report.score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Rank the most frequent content words.
    #[tool(description = "List the most frequent non-stop-words in CV text with their counts.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn top_keywords(
        &self,
        Parameters(params): Parameters<TopKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.limit.unwrap_or(keywords::DEFAULT_KEYWORD_LIMIT);
        tracing::debug!(tool = "top_keywords", limit, "executing MCP tool");

        let input = self.prepare(&params.text, false)?;
        let tokens = text::tokenize(&text::normalize(&input));
        let ranked = keywords::top_keywords(&tokens, limit);
        let json = to_json(&ranked)?;

        tracing::info!(tool = "top_keywords", count = ranked.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Check section coverage.
    #[tool(
        description = "Score coverage of the standard CV sections (Experience, Education, Skills, Certifications, Languages) and list missing ones."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_sections(
        &self,
        Parameters(params): Parameters<CheckSectionsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_sections", sections = ?params.sections, "executing MCP tool");

        let input = self.prepare(&params.text, false)?;
        let report = sections::check_sections(&input, params.sections.as_deref())
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let json = to_json(&report)?;

        tracing::info!(tool = "check_sections", pass = report.pass, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Check ATS compatibility.
    #[tool(
        description = "Check CV text for applicant tracking system compatibility. Returns a 0-100 score with issues and recommendations."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn check_ats(
        &self,
        Parameters(params): Parameters<CheckAtsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "check_ats", min_score = ?params.min_score, "executing MCP tool");

        let input = self.prepare(&params.text, false)?;
        let report = ats::check_ats(&input, params.min_score);
        let json = to_json(&report)?;

        tracing::info!(tool = "check_ats", score = report.score, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

impl ProjectServer {
    /// Enforce the size limit and convert markdown when asked.
    fn prepare(&self, text: &str, is_markdown: bool) -> Result<String, McpError> {
        if let Some(max) = self.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(if is_markdown {
            markdown::to_plain_text(text)
        } else {
            text.to_string()
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Pass extracted CV text to the tools to score readability, keywords, section coverage and ATS compatibility.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
