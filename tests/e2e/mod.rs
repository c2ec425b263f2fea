// End-to-end tests for the Motivation Backend API
//
// These tests assemble the real router with wiremock servers standing in
// for the LLM provider and TTS HTTP APIs, and a temporary directory as
// the audio store. Requests are driven through the router directly via
// tower's oneshot, so no listening socket is needed.

mod helpers;
mod test_audio;
mod test_health;
