//! End-to-end tests for the Quill gateway live under `tests/`, each driving a
//! real adapter against an in-process mock backend.
