mod filtering;
mod loading;
mod portal;
mod search;
