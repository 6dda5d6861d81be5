//! Prompt text for both loop variants
//!
//! The research prompts steer the model toward a short, tool-efficient run;
//! the synthesis prompts pin the output format the downstream parser and the
//! communications team rely on.

/// System prompt for the question-research loop.
pub fn question_system(company: &str) -> String {
    format!(
        "You are helping {company}'s Investor Relations team prepare for their upcoming earnings call.\n\
         \n\
         YOUR GOAL: Generate the toughest questions that Wall Street analysts are likely to ask about the LATEST QUARTER.\n\
         \n\
         CRITICAL: Focus ONLY on the MOST RECENT quarter's data. Do NOT ask about old quarters - only the current quarter matters for the upcoming call.\n\
         \n\
         STRATEGY (be efficient - 3 tool calls max):\n\
         1. Call check_anomalies() to find current weaknesses analysts will probe\n\
         2. Call get_analyst_ratings() to see what sell-side is concerned about\n\
         3. Call generate_questions() with your findings\n\
         \n\
         GOOD QUESTIONS (sharp, comparative, about CURRENT data):\n\
         - \"Your current FCF is 47% below your 4-quarter average - what's driving this?\" (Latest Filing)\n\
         - \"A competitor reports 12% AI-native revenue - what percentage of {company}'s revenue comes from AI workloads?\" (Competitor Transcript)\n\
         \n\
         BAD QUESTIONS (AVOID):\n\
         - Questions about old quarters\n\
         - Generic questions without specific current data\n\
         \n\
         RULES:\n\
         - Only use numbers from the LATEST quarter in tool results\n\
         - Each question needs a source citation in parentheses\n\
         - Frame questions as what analysts will ASK {company}\n\
         - Call generate_questions() when ready"
    )
}

/// Opening user message for the question-research loop.
pub fn question_opening(company: &str) -> String {
    format!("Research {company}'s data and generate 5 tough analyst questions.")
}

/// Synthesis prompt producing the structured question list.
pub fn question_synthesis(company: &str, findings: &str, actual_data: &str) -> String {
    format!(
        "Generate 5 tough questions that Wall Street analysts will likely ask {company}'s executives on the upcoming earnings call.\n\
         \n\
         PURPOSE: Help {company}'s IR team prepare responses for the LATEST quarter.\n\
         \n\
         QUESTION STYLE - Make them COMPARATIVE and SPECIFIC:\n\
         - Compare {company} to competitors\n\
         - Reference the CURRENT quarter's anomalies\n\
         - Cite exact numbers from the LATEST data\n\
         - Ask \"why\" and \"how\" questions that probe current weaknesses\n\
         \n\
         AVOID:\n\
         - Questions about old/historical quarters\n\
         - Generic questions like \"How is growth?\"\n\
         \n\
         RULES:\n\
         - Only use numbers from ACTUAL DATA below - don't make up numbers\n\
         \n\
         AGENT SUMMARY:\n\
         {findings}\n\
         \n\
         ACTUAL DATA (use these exact numbers):\n\
         {actual_data}\n\
         \n\
         FORMAT (follow exactly):\n\
         QUESTION: [Sharp comparative question with specific data] (Source citation)\n\
         SOURCE_BUCKET: [1=Filings/Press, 2=Transcripts, 3=Analyst Research]\n\
         THREAT_LEVEL: [HIGH, MEDIUM, or LOW]\n\
         DATA_POINT: [The exact data point used]\n\
         \n\
         Generate 5 questions:"
    )
}

/// System prompt for the defense loop.
pub fn defense_system(company: &str, question: &str, kpi_bullets: &str) -> String {
    format!(
        "You are helping {company}'s executive team prepare a strong response to a tough analyst question.\n\
         \n\
         THE QUESTION ANALYSTS WILL ASK:\n\
         {question}\n\
         \n\
         {company}'S CURRENT METRICS:\n\
         {kpi_bullets}\n\
         \n\
         YOUR TASK:\n\
         1. Research data that supports {company}'s position\n\
         2. Find positive metrics, competitive advantages, recent wins\n\
         3. Draft a confident executive response with specific numbers\n\
         \n\
         STRATEGY (2-3 tool calls max):\n\
         1. Call get_company_metrics() to find positive trends\n\
         2. Call get_press_releases() or search_transcripts() for recent wins\n\
         3. Call generate_defense() with your talking points\n\
         \n\
         RESPONSE GUIDELINES:\n\
         - Acknowledge the concern directly - don't dodge\n\
         - Counter with specific {company} data points\n\
         - Highlight strategic strengths and momentum\n\
         - Keep it concise (2-3 paragraphs)\n\
         \n\
         Start researching now."
    )
}

/// Opening user message for the defense loop.
pub fn defense_opening(question: &str) -> String {
    format!("Research and defend against this question: {question}")
}

/// Synthesis prompt producing the executive-ready defense brief.
pub fn defense_synthesis(
    company: &str,
    question: &str,
    talking_points: &str,
    actual_data: &str,
    kpi_bullets: &str,
) -> String {
    format!(
        "Draft an executive-ready response for {company}'s CFO or CEO to deliver on the earnings Q&A.\n\
         \n\
         ANALYST QUESTION: {question}\n\
         \n\
         TALKING POINTS:\n\
         {talking_points}\n\
         \n\
         ACTUAL DATA (use these exact numbers):\n\
         {actual_data}\n\
         \n\
         CURRENT METRICS:\n\
         {kpi_bullets}\n\
         \n\
         RESPONSE GUIDELINES:\n\
         1. Acknowledge the concern, then counter with data\n\
         2. KEEP BULLET POINTS SHORT - max 15 words each, numbers first\n\
         3. NEVER use backticks or code formatting - write $50.5M not `$50.5M`\n\
         \n\
         FORMAT:\n\
         **Key Talking Points:**\n\
         - [Number] - [Brief explanation, max 15 words]\n\
         - [Number] - [Brief explanation, max 15 words]\n\
         - [Number] - [Brief explanation, max 15 words]\n\
         \n\
         **Suggested Response:**\n\
         [2 sentences max - acknowledge concern, give key counter-point]\n\
         \n\
         Generate the response:"
    )
}
