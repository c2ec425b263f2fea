/// Wrap the user's situation in the fixed motivational prompt.
/// The same template is sent to every provider.
pub fn motivational_prompt(user_input: &str) -> String {
    format!(
        "Please provide a motivational and actionable response to the following situation, \
         limited to 500 words:\n\
         {user_input}\n\
         \n\
         Requirements:\n\
         1. Be motivational and uplifting\n\
         2. Include specific, actionable steps\n\
         3. End with a fun \"This Day in History\" fact\n\
         4. Use markdown formatting for better readability\n\
         5. Keep the tone positive and encouraging\n"
    )
}
