/*!
 * Prompt templates for the four pipeline stages.
 *
 * Templates use `{placeholder}` markers replaced at render time. Upstream
 * stage texts are inserted verbatim.
 */

/// Prompt template for one stage
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    template: &'static str,
}

impl PromptTemplate {
    /// Translation persona prompt
    pub const TRANSLATION: &'static str = r#"You are a professional marketing translator. Translate the following marketing content to {target_language}.
Maintain the marketing tone, emotional impact, and call-to-action effectiveness.

Original content: {content}

Provide only the translation, no explanations."#;

    /// Cultural adaptation prompt
    pub const CULTURAL_ADAPTATION: &'static str = r#"You are a cultural adaptation expert. Adapt the following marketing content for {target_region}.

Cultural Guidelines for {target_region}:
{cultural_context}

Original content: {content}

Adapt the content considering:
1. Cultural values and sensitivities
2. Local preferences and customs
3. Communication style
4. Visual and messaging tone

Provide the adapted content with brief explanation of changes made."#;

    /// Compliance review prompt
    pub const COMPLIANCE_CHECK: &'static str = r#"You are a compliance expert. Review the following marketing content for {target_region} in {industry} industry.

Compliance Rules for {target_region}:
{compliance_rules}

Content to review: {content}

Analyze for:
1. Legal compliance issues
2. Advertising standards violations
3. Industry-specific regulations
4. Required disclaimers or warnings

Provide: COMPLIANT/NON-COMPLIANT and explanation."#;

    /// Exception analysis prompt
    pub const EXCEPTION_ANALYSIS: &'static str = r#"You are an exception management system. Analyze the following results and determine if human review is needed.

Translation Result: {translation}
Cultural Adaptation Result: {cultural_adaptation}
Compliance Check Result: {compliance_check}

Flag for human review if:
1. Compliance issues detected
2. Significant cultural adaptation needed
3. Translation accuracy concerns
4. Legal disclaimers required

Provide: HUMAN_REVIEW_REQUIRED/AUTO_APPROVE and priority level (HIGH/MEDIUM/LOW) with reason."#;

    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Replace each `{key}` with its value.
    ///
    /// Substitution runs over the template only, so a value containing `{...}`
    /// text is never expanded again.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(
            self.template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let replaced = after.find('}').and_then(|close| {
                let key = &after[..close];
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, value)| (*value, close))
            });

            match replaced {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Build the translation prompt
pub fn translation_prompt(content: &str, target_language: &str) -> String {
    PromptTemplate::new(PromptTemplate::TRANSLATION)
        .render(&[("target_language", target_language), ("content", content)])
}

/// Build the cultural adaptation prompt
pub fn cultural_adaptation_prompt(content: &str, target_region: &str, cultural_context: &str) -> String {
    PromptTemplate::new(PromptTemplate::CULTURAL_ADAPTATION).render(&[
        ("target_region", target_region),
        ("cultural_context", cultural_context),
        ("content", content),
    ])
}

/// Build the compliance prompt; `industry` is passed in lowercase
pub fn compliance_prompt(content: &str, target_region: &str, industry: &str, compliance_rules: &str) -> String {
    PromptTemplate::new(PromptTemplate::COMPLIANCE_CHECK).render(&[
        ("target_region", target_region),
        ("industry", industry),
        ("compliance_rules", compliance_rules),
        ("content", content),
    ])
}

/// Build the exception analysis prompt
pub fn exception_prompt(translation: &str, cultural_adaptation: &str, compliance_check: &str) -> String {
    PromptTemplate::new(PromptTemplate::EXCEPTION_ANALYSIS).render(&[
        ("translation", translation),
        ("cultural_adaptation", cultural_adaptation),
        ("compliance_check", compliance_check),
    ])
}
