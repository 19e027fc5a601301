#![cfg(test)]

mod scanning;
