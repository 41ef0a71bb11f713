/// Build the analysis instruction for `markdown`. The model is asked for a
/// bare JSON object and nothing else.
pub fn build_prompt(markdown: &str) -> String {
    format!(
        r#"You are an expert science communicator and research analyst AI. Your task is to analyze a scientific article and return a structured JSON object with summaries, keywords, and a complexity score. Do not add any commentary or conversational text outside of the JSON object.

Analyze the following science article and provide the requested analysis in a JSON format.

**Article Content:**
```markdown
{markdown}
```

Required JSON Output Format:
{{
  "tldrSummary": "A one-sentence summary of the core finding.",
  "eli5Summary": "A simple, analogy-driven explanation for a non-expert.",
  "technicalSummary": "A detailed 3-4 sentence summary for a scientific audience.",
  "suggestedTags": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5"],
  "complexityScore": 3
}}

Rules:
- tldrSummary: Must be ONE sentence, capture the core finding
- eli5Summary: Use analogies, avoid jargon, explain like talking to a 5-year-old
- technicalSummary: 3-4 sentences, use appropriate scientific terminology
- suggestedTags: 5-10 relevant scientific keywords
- complexityScore: 1 (General Public) to 5 (Deep Expert Only)

Return ONLY the JSON object, no other text."#
    )
}
