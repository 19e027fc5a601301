mod integration;
mod mocks;
