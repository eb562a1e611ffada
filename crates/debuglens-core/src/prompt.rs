//! Debug prompt assembly.
//!
//! The template is fixed text with a single substitution point; nothing in it
//! depends on the extracted content. Downstream consumers may split model
//! output on the headers listed in [`RESPONSE_SECTIONS`].

use crate::domain::DebugPrompt;

/// Section headers the model is instructed to emit, in order.
pub const RESPONSE_SECTIONS: [&str; 6] = [
    "Root Cause:",
    "Fix Code:",
    "Steps to Apply:",
    "Prevention:",
    "Type Coercion Detected:",
    "Confidence:",
];

const INSTRUCTIONS: &str = "
You are DebugAI, an expert multimodal debugging assistant.

You are given:
- A screenshot of a code editor / terminal
- OCR-extracted text from the screenshot

Your tasks:
1. Identify the programming language.
2. Locate the exact error or logical issue.
3. Explain the root cause clearly.
4. Provide corrected code.
5. Give step-by-step instructions to apply the fix.
6. Suggest prevention best practices.
7. Check specifically for implicit type coercion or mixed-type arithmetic (for example, string + number in JavaScript or concatenation vs addition in Python/JS). If you detect mixed types causing incorrect results, explain the coercion behavior and provide an explicit conversion fix (e.g., `Number(a) + Number(b)` or `int(x)` as appropriate).
8. Give a confidence score (0-100%).

FORMAT YOUR RESPONSE EXACTLY AS:

Root Cause:
...

Fix Code:
<language>
<code>

Steps to Apply:
1.
2.

Prevention:
...

Type Coercion Detected:
Yes/No
If Yes - Explanation and explicit conversion recommendation:
...

Confidence:
XX%

OCR Text:
";

/// Render the debug prompt around the extracted text.
///
/// The text is inserted verbatim, with no escaping.
pub fn build_debug_prompt(extracted_text: &str) -> DebugPrompt {
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + extracted_text.len() + 1);
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(extracted_text);
    prompt.push('\n');
    DebugPrompt::new(prompt)
}
