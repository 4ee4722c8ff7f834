//! Prompt templates for SPARQL generation.
//!
//! The system prompt pins the model to the hint vocabulary and linked
//! entities; inventing identifiers is the main failure mode we are
//! defending against. The user prompt carries the question plus the
//! allowed-identifier blocks, and optionally feedback from a failed
//! earlier attempt.

use crate::core::question::Question;
use crate::schema::entity::LinkedEntity;
use crate::schema::hints::SchemaHint;
use crate::sparql::prefixes::all_declarations;

/// Templates for the generation request.
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt: generation rules and the standard prefix block.
    pub fn generation_system(select_limit: u32) -> String {
        format!(
            "You are a DBpedia SPARQL generator.\n\
             Rules you must follow:\n\
             - Use ONLY properties listed under Allowed Properties.\n\
             - Use ONLY entities listed under Allowed Entities.\n\
             - Use ONLY classes listed under Allowed Classes.\n\
             - Use rdf:type only with Allowed Classes.\n\
             - Do NOT invent properties, entities, or classes.\n\
             - If the request cannot be answered with the allowed items, \
             output a query that returns no results using FILTER(false).\n\
             - Output only valid SPARQL with PREFIX declarations. No markdown or explanations.\n\
             - For SELECT queries, include LIMIT {} unless the user asks for all results.\n\
             - Use the following prefixes when relevant:\n{}",
            select_limit,
            all_declarations()
        )
    }

    /// User prompt: question plus allowed entities/classes/properties.
    pub fn generation_request(
        question: &Question,
        hints: &SchemaHint,
        entities: &[LinkedEntity],
        prior_feedback: Option<&str>,
    ) -> String {
        let entity_block = if entities.is_empty() {
            "- (none)".to_string()
        } else {
            entities
                .iter()
                .map(|ent| {
                    let mut line = format!(
                        "- {} | {} | surface='{}'",
                        crate::sparql::prefixes::uri_to_prefixed(&ent.uri),
                        ent.uri,
                        ent.surface_form
                    );
                    if !ent.types.is_empty() {
                        line.push_str(&format!(" | types='{}'", ent.types));
                    }
                    line
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let property_block = hints
            .properties
            .iter()
            .map(|p| format!("- {} | {} | label='{}' | desc='{}'", p.prefixed(), p.uri, p.label, p.description))
            .collect::<Vec<_>>()
            .join("\n");

        let class_block = hints
            .classes
            .iter()
            .map(|c| format!("- {} | {} | label='{}' | desc='{}'", c.prefixed(), c.uri, c.label, c.description))
            .collect::<Vec<_>>()
            .join("\n");

        let mut prompt = format!(
            "Question: {}\n\n\
             Allowed Entities:\n{}\n\n\
             Allowed Classes:\n{}\n\n\
             Allowed Properties:\n{}\n",
            question, entity_block, class_block, property_block
        );

        if let Some(feedback) = prior_feedback {
            prompt.push_str(&format!(
                "\nA previous attempt failed: {}\n\
                 Produce a corrected query for the same question.\n",
                feedback
            ));
        }

        prompt
    }
}
