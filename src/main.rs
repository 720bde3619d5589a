use {
    std::{
        env, fs,
        io::{self, prelude::*},
        process,
    },
    text_huffman::{
        compress, decode, decompress, encode_text, stream, CodeTable, Error, FrequencyTable,
        HuffmanTree,
    },
    tracing_subscriber::EnvFilter,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = match args.as_slice() {
        ["frequencies", input] => frequencies(input),
        ["codes", input] => codes(input),
        ["encode", input] => encode(input, None),
        ["encode", input, listing] => encode(input, Some(*listing)),
        ["decode", listing, encoded] => decode_literal(listing, encoded),
        ["pack", input] => read_text(input)
            .and_then(|text| compress(&text))
            .and_then(write_out),
        ["unpack", input] => read(input)
            .map_err(Error::from)
            .and_then(|bytes| decompress(&bytes))
            .and_then(|text| write_out(text.into_bytes())),
        _ => print_usage(),
    };

    if let Err(err) = result {
        eprintln!("text-huffman: {}", err);
        process::exit(1)
    }
}

fn print_usage() -> ! {
    println!("Usage:");
    println!("  text-huffman frequencies <path>          Print the character frequencies");
    println!("  text-huffman codes <path>                Print the codeword listing");
    println!("  text-huffman encode <path> [<listing>]   Print the 0/1 codeword stream, optionally saving the listing");
    println!("  text-huffman decode <listing> <path>     Decode a 0/1 codeword stream");
    println!("  text-huffman pack <path>                 Compress into a packed container");
    println!("  text-huffman unpack <path>               Decompress a packed container");
    println!();
    println!("A path of - reads from stdin. Output goes to stdout.");
    process::exit(1)
}

fn frequencies(input: &str) -> Result<(), Error> {
    let text = read_text(input)?;
    write_out(FrequencyTable::of(&text).to_string().into_bytes())
}

fn codes(input: &str) -> Result<(), Error> {
    let text = read_text(input)?;
    let table = CodeTable::of(&HuffmanTree::of(&text)?);
    write_out(table.to_string().into_bytes())
}

fn encode(input: &str, listing: Option<&str>) -> Result<(), Error> {
    let text = read_text(input)?;
    let (table, bits) = encode_text(&text)?;
    if let Some(path) = listing {
        let mut out = io::BufWriter::new(fs::File::create(path)?);
        table.write_listing(&mut out)?;
        out.flush()?;
    }
    write_out(stream::render(&bits).into_bytes())
}

fn decode_literal(listing: &str, encoded: &str) -> Result<(), Error> {
    let table = CodeTable::read_listing(&read_text(listing)?)?;
    let bits = stream::parse(&read_text(encoded)?)?;
    write_out(decode(&bits, &table)?.into_bytes())
}

fn read(path: &str) -> io::Result<Vec<u8>> {
    if path == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}

fn read_text(path: &str) -> Result<String, Error> {
    let bytes = read(path)?;
    String::from_utf8(bytes)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}

fn write_out(bytes: Vec<u8>) -> Result<(), Error> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}
